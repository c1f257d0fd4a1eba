//! Streak engine use cases.
//!
//! The write path (`RecordCompletion`) is the only writer of streak
//! counters; `GetOrCreateUser` creates records and `ComputeStatus` is
//! strictly read-only.

use std::sync::Arc;

use streakd_domain::SteamId;

use crate::infrastructure::ports::{ClockPort, StoreError, UserStore};

mod compute_status;
mod get_or_create;
mod record_completion;

pub use compute_status::ComputeStatus;
pub use get_or_create::GetOrCreateUser;
pub use record_completion::{CompletionResult, RecordCompletion};

/// Error type for streak operations.
#[derive(Debug, thiserror::Error)]
pub enum StreakError {
    /// Caller must `GetOrCreateUser` before other operations.
    #[error("User not found: {0}")]
    UserNotFound(SteamId),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Container for streak use cases.
pub struct StreakUseCases {
    pub get_or_create: Arc<GetOrCreateUser>,
    pub record_completion: Arc<RecordCompletion>,
    pub compute_status: Arc<ComputeStatus>,
}

impl StreakUseCases {
    pub fn new(store: Arc<dyn UserStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            get_or_create: Arc::new(GetOrCreateUser::new(store.clone(), clock.clone())),
            record_completion: Arc::new(RecordCompletion::new(store.clone(), clock.clone())),
            compute_status: Arc::new(ComputeStatus::new(store, clock)),
        }
    }
}
