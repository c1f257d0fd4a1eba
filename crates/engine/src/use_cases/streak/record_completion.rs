//! Record completion use case - the streak state machine write path.

use std::sync::Arc;

use streakd_domain::{CompletionOutcome, SteamId, UserStreakRecord};

use crate::infrastructure::ports::{ClockPort, UserStore};

use super::StreakError;

/// Outcome of a recorded completion: the stored record plus the
/// classification of what the completion did to the streak.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    pub record: UserStreakRecord,
    pub outcome: CompletionOutcome,
}

/// Records a confirmed achievement completion and advances the streak.
///
/// The only writer of `current_streak`, `longest_streak`,
/// `total_completions`, and `last_completion_at`. One atomic full-record
/// replacement per call; either the updated record is durably stored and
/// returned, or the operation fails with the prior record unchanged.
pub struct RecordCompletion {
    store: Arc<dyn UserStore>,
    clock: Arc<dyn ClockPort>,
}

impl RecordCompletion {
    pub fn new(store: Arc<dyn UserStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(&self, steam_id: &SteamId) -> Result<CompletionResult, StreakError> {
        let mut record = self
            .store
            .get(steam_id)
            .await?
            .ok_or_else(|| StreakError::UserNotFound(steam_id.clone()))?;

        let expected_last = record.last_completion_at;
        let outcome = record.apply_completion(self.clock.now());

        // Conditional replace keyed on the instant we read: if another writer
        // advanced the record in between, the store rejects this write
        // instead of corrupting the counters.
        self.store.replace(&record, expected_last).await?;

        match &outcome {
            CompletionOutcome::StreakExtended { current, longest } => {
                tracing::info!(steam_id = %record.steam_id, current, longest, "Streak extended");
            }
            CompletionOutcome::StreakReset { previous } => {
                tracing::info!(steam_id = %record.steam_id, previous, "Streak reset");
            }
            _ => {}
        }

        Ok(CompletionResult { record, outcome })
    }
}
