//! Port for the external achievement-tracking source.

use std::collections::HashSet;

use async_trait::async_trait;
use streakd_domain::{Achievement, AppId, SteamId};

use super::error::SourceError;

/// Read-only achievement data source (the Steam Web API in production).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementSource: Send + Sync {
    /// A game's full achievement catalog.
    ///
    /// An empty vec means the game defines no achievements; that is not a
    /// failure and must stay distinct from [`SourceError`].
    async fn game_achievements(&self, app_id: AppId) -> Result<Vec<Achievement>, SourceError>;

    /// Names of the achievements a player has unlocked in a game.
    async fn player_unlocked(
        &self,
        steam_id: &SteamId,
        app_id: AppId,
    ) -> Result<HashSet<String>, SourceError>;
}
