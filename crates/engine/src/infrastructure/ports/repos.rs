//! Repository port for user streak records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use streakd_domain::{SteamId, UserStreakRecord};

use super::error::StoreError;

/// Keyed storage for per-user streak records.
///
/// One record per Steam ID; get, create, and full-record replace only. The
/// streak engine needs no listing or query capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, steam_id: &SteamId) -> Result<Option<UserStreakRecord>, StoreError>;

    /// Insert a new record. An existing key fails with
    /// [`StoreError::AlreadyExists`].
    async fn create(&self, record: &UserStreakRecord) -> Result<(), StoreError>;

    /// Full-record replacement, conditional on the stored
    /// `last_completion_at` still matching `expected_last`.
    ///
    /// The compare-and-swap guard makes the read-modify-write sequence in
    /// `RecordCompletion` safe without an external per-key lock: a stale
    /// write fails with [`StoreError::Conflict`] instead of clobbering a
    /// concurrent update.
    async fn replace(
        &self,
        record: &UserStreakRecord,
        expected_last: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError>;
}
