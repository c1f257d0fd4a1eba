//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Uniformly random index into a collection of length `len`.
    ///
    /// `len` must be greater than zero.
    fn pick_index(&self, len: usize) -> usize;
}
