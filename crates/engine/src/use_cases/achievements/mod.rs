//! Achievement client - catalog fetches and random challenge picks.

use std::collections::HashSet;
use std::sync::Arc;

use streakd_domain::{Achievement, AppId, SteamId};

use crate::infrastructure::ports::{AchievementSource, RandomPort, SourceError};

/// Error type for achievement operations.
#[derive(Debug, thiserror::Error)]
pub enum AchievementError {
    #[error("Achievement source error: {0}")]
    Source(#[from] SourceError),
}

/// Thin wrapper over the achievement source.
///
/// Stateless; reads may run concurrently for different games without
/// coordination. Independent of the streak engine.
pub struct Achievements {
    source: Arc<dyn AchievementSource>,
    random: Arc<dyn RandomPort>,
}

impl Achievements {
    pub fn new(source: Arc<dyn AchievementSource>, random: Arc<dyn RandomPort>) -> Self {
        Self { source, random }
    }

    /// A game's full achievement catalog. Empty when the game defines none.
    pub async fn catalog(&self, app_id: AppId) -> Result<Vec<Achievement>, AchievementError> {
        Ok(self.source.game_achievements(app_id).await?)
    }

    /// Names of the achievements a player has unlocked in a game.
    pub async fn unlocked(
        &self,
        steam_id: &SteamId,
        app_id: AppId,
    ) -> Result<HashSet<String>, AchievementError> {
        Ok(self.source.player_unlocked(steam_id, app_id).await?)
    }

    /// Uniformly random achievement from a game, optionally restricted to
    /// one player's unlocked set.
    ///
    /// `Ok(None)` when the candidate set is empty after filtering; that is
    /// not a failure.
    pub async fn pick_random(
        &self,
        app_id: AppId,
        only_unlocked_for: Option<&SteamId>,
    ) -> Result<Option<Achievement>, AchievementError> {
        let mut candidates = self.source.game_achievements(app_id).await?;

        if let Some(steam_id) = only_unlocked_for {
            let unlocked = self.source.player_unlocked(steam_id, app_id).await?;
            candidates.retain(|a| unlocked.contains(&a.name));
        }

        if candidates.is_empty() {
            return Ok(None);
        }

        let index = self.random.pick_index(candidates.len());
        Ok(Some(candidates.swap_remove(index)))
    }
}
