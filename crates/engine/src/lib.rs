//! Streakd engine library.
//!
//! Everything around the domain core:
//!
//! - `infrastructure/` - port traits plus their adapters (Steam Web API
//!   client, SQLite and in-memory user stores, clock/random)
//! - `use_cases/` - streak engine and achievement client operations
//! - `app` - application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
