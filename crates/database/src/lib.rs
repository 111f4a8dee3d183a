//! # Tradelog Database Crate
//!
//! This crate is the application's date-indexed archive of uploaded trading
//! days, the opaque base aggregate, and per-day notes.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All storage-specific logic lives here behind the `TradingDataStore`
//!   and `NotesStore` traits, so the web layer never sees SQL.
//! - **Two Backends:** `DbRepository` persists to PostgreSQL through a `sqlx` pool;
//!   `MemoryStore` keeps everything in process for local runs and tests.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: establish the pool and bring the schema up to date.
//! - `DbRepository`, `MemoryStore`: the two store implementations.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryStore;
pub use repository::DbRepository;
pub use store::{NotesStore, TradingDataStore};
