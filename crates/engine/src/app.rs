//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{AchievementSource, ClockPort, RandomPort, UserStore};
use crate::use_cases::{Achievements, StreakUseCases};

/// Main application state.
///
/// Holds the use-case containers, wired against injected ports.
pub struct App {
    pub streak: StreakUseCases,
    pub achievements: Arc<Achievements>,
}

impl App {
    pub fn new(
        store: Arc<dyn UserStore>,
        source: Arc<dyn AchievementSource>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            streak: StreakUseCases::new(store, clock),
            achievements: Arc::new(Achievements::new(source, random)),
        }
    }
}
