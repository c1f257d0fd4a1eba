//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - User record storage (could swap SQLite -> any keyed document store)
//! - The achievement source (could swap the Steam Web API -> another tracker)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{SourceError, StoreError};
pub use external::AchievementSource;
pub use repos::UserStore;
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use external::MockAchievementSource;
#[cfg(test)]
pub use repos::MockUserStore;
#[cfg(test)]
pub use testing::MockClockPort;
