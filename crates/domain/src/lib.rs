//! Streakd domain types.
//!
//! Pure types and logic with no I/O:
//!
//! - `ids` - validated identifier newtypes
//! - `streak` - the per-user completion streak state machine
//! - `status` - read-only streak health classification
//! - `achievement` - achievement catalog records

pub mod achievement;
pub mod error;
pub mod ids;
pub mod status;
pub mod streak;

pub use achievement::Achievement;
pub use error::DomainError;
pub use ids::{AppId, SteamId};
pub use status::{StatusReport, StreakStatus};
pub use streak::{hours_between, CompletionOutcome, CompletionWindow, UserStreakRecord};
