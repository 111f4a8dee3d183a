pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Quarter, TradeSide};
pub use error::CoreError;
pub use structs::{
    AnalysisRecord, DayMetadata, DayRecord, Headline, ParsedTrade, QuarterData, WeekLog,
};
