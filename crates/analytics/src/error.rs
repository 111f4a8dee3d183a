use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyticsError {
    #[error("Week start '{week_start}' is not a YYYY-MM-DD date.")]
    MalformedWeek { week_start: String },

    #[error("Week '{week_start}' overflows its quarter totals.")]
    Overflow { week_start: String },
}
