//! In-memory user store for tests and ephemeral runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use streakd_domain::{SteamId, UserStreakRecord};

use crate::infrastructure::ports::{StoreError, UserStore};

/// DashMap-backed store honoring the same compare-and-swap contract as the
/// SQLite adapter.
#[derive(Default)]
pub struct InMemoryUserStore {
    records: DashMap<SteamId, UserStreakRecord>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, steam_id: &SteamId) -> Result<Option<UserStreakRecord>, StoreError> {
        Ok(self.records.get(steam_id).map(|r| r.clone()))
    }

    async fn create(&self, record: &UserStreakRecord) -> Result<(), StoreError> {
        match self.records.entry(record.steam_id.clone()) {
            dashmap::Entry::Occupied(_) => Err(StoreError::AlreadyExists),
            dashmap::Entry::Vacant(entry) => {
                entry.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn replace(
        &self,
        record: &UserStreakRecord,
        expected_last: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        match self.records.get_mut(&record.steam_id) {
            Some(mut existing) if existing.last_completion_at == expected_last => {
                *existing = record.clone();
                Ok(())
            }
            // Stale expectation or missing record; either way the write loses.
            Some(_) | None => Err(StoreError::Conflict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_record() -> UserStreakRecord {
        UserStreakRecord::new(
            SteamId::new("76561198012345678").expect("valid id"),
            None,
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid time"),
        )
    }

    #[tokio::test]
    async fn create_get_replace_roundtrip() {
        let store = InMemoryUserStore::new();
        let mut record = test_record();

        store.create(&record).await.expect("create");
        assert!(matches!(
            store.create(&record).await,
            Err(StoreError::AlreadyExists)
        ));

        let now = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).single().expect("valid time");
        record.apply_completion(now);
        store.replace(&record, None).await.expect("replace");

        let loaded = store
            .get(&record.steam_id)
            .await
            .expect("get")
            .expect("record exists");
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn stale_replace_conflicts() {
        let store = InMemoryUserStore::new();
        let mut record = test_record();
        store.create(&record).await.expect("create");

        let now = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).single().expect("valid time");
        record.apply_completion(now);
        store.replace(&record, None).await.expect("first write");

        assert!(matches!(
            store.replace(&record, None).await,
            Err(StoreError::Conflict)
        ));
    }
}
