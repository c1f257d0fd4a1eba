//! Use cases - one struct per operation, ports injected as `Arc<dyn _>`.

pub mod achievements;
pub mod streak;

pub use achievements::{AchievementError, Achievements};
pub use streak::{
    CompletionResult, ComputeStatus, GetOrCreateUser, RecordCompletion, StreakError,
    StreakUseCases,
};
