//! Compute status use case - read-only streak health report.

use std::sync::Arc;

use streakd_domain::{StatusReport, SteamId};

use crate::infrastructure::ports::{ClockPort, UserStore};

use super::StreakError;

/// Builds a point-in-time status report for a user. Never writes.
pub struct ComputeStatus {
    store: Arc<dyn UserStore>,
    clock: Arc<dyn ClockPort>,
}

impl ComputeStatus {
    pub fn new(store: Arc<dyn UserStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(&self, steam_id: &SteamId) -> Result<StatusReport, StreakError> {
        let record = self
            .store
            .get(steam_id)
            .await?
            .ok_or_else(|| StreakError::UserNotFound(steam_id.clone()))?;

        Ok(StatusReport::for_record(&record, self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockClockPort, MockUserStore};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use streakd_domain::{StreakStatus, UserStreakRecord};

    fn test_steam_id() -> SteamId {
        SteamId::new("76561198012345678").expect("valid id")
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid time")
    }

    fn use_case_with(record: UserStreakRecord, now: DateTime<Utc>) -> ComputeStatus {
        let mut store = MockUserStore::new();
        let mut clock = MockClockPort::new();
        // Read-only contract: no replace() or create() expectations exist,
        // so any write fails the test.
        store.expect_get().returning(move |_| Ok(Some(record.clone())));
        clock.expect_now().returning(move || now);
        ComputeStatus::new(Arc::new(store), Arc::new(clock))
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let mut store = MockUserStore::new();
        let clock = MockClockPort::new();
        store.expect_get().returning(|_| Ok(None));

        let use_case = ComputeStatus::new(Arc::new(store), Arc::new(clock));
        let err = use_case
            .execute(&test_steam_id())
            .await
            .expect_err("unknown user");
        assert!(matches!(err, StreakError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn no_completions_yet() {
        let record = UserStreakRecord::new(test_steam_id(), None, t0());
        let report = use_case_with(record, t0() + Duration::hours(5))
            .execute(&test_steam_id())
            .await
            .expect("report");

        assert_eq!(report.status, StreakStatus::NoCompletions);
        assert_eq!(report.current_streak, 0);
    }

    #[tokio::test]
    async fn waiting_inside_the_same_day_window() {
        let mut record = UserStreakRecord::new(test_steam_id(), None, t0());
        record.apply_completion(t0());

        let report = use_case_with(record, t0() + Duration::hours(10))
            .execute(&test_steam_id())
            .await
            .expect("report");

        match report.status {
            StreakStatus::Waiting { hours_remaining } => {
                assert!((hours_remaining - 14.0).abs() < 1e-9);
            }
            other => panic!("expected waiting, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ready_and_lapsing_windows() {
        let mut record = UserStreakRecord::new(test_steam_id(), None, t0());
        record.apply_completion(t0());

        let report = use_case_with(record.clone(), t0() + Duration::hours(24))
            .execute(&test_steam_id())
            .await
            .expect("report");
        assert!(matches!(report.status, StreakStatus::ReadyToExtend { .. }));

        let report = use_case_with(record, t0() + Duration::hours(48))
            .execute(&test_steam_id())
            .await
            .expect("report");
        assert!(matches!(report.status, StreakStatus::Lapsing { .. }));
    }
}
