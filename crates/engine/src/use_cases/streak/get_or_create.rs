//! Get-or-create use case - looks up a user record, creating it on first sight.

use std::sync::Arc;

use streakd_domain::{SteamId, UserStreakRecord};

use crate::infrastructure::ports::{ClockPort, StoreError, UserStore};

use super::StreakError;

/// Returns the record for a Steam ID, creating a zeroed one for a
/// previously-unseen key.
pub struct GetOrCreateUser {
    store: Arc<dyn UserStore>,
    clock: Arc<dyn ClockPort>,
}

impl GetOrCreateUser {
    pub fn new(store: Arc<dyn UserStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    /// Return the existing record untouched, or create and persist a new one.
    ///
    /// Safe to call repeatedly: after the first creation this is a plain
    /// read with no side effects. `display_name` is only a hint for
    /// creation; an existing record's name is never overwritten here.
    pub async fn execute(
        &self,
        steam_id: &SteamId,
        display_name: Option<&str>,
    ) -> Result<UserStreakRecord, StreakError> {
        if let Some(existing) = self.store.get(steam_id).await? {
            return Ok(existing);
        }

        let record = UserStreakRecord::new(steam_id.clone(), display_name, self.clock.now());
        match self.store.create(&record).await {
            Ok(()) => {
                tracing::info!(
                    steam_id = %record.steam_id,
                    display_name = %record.display_name,
                    "Created new user record"
                );
                Ok(record)
            }
            // Lost a create race; another caller made the record first.
            Err(StoreError::AlreadyExists) => self
                .store
                .get(steam_id)
                .await?
                .ok_or_else(|| StreakError::UserNotFound(steam_id.clone())),
            Err(e) => Err(e.into()),
        }
    }
}
