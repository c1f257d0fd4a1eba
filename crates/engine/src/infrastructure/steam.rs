//! Steam Web API client for achievement data.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use streakd_domain::{Achievement, AppId, SteamId};

use crate::infrastructure::ports::{AchievementSource, SourceError};

/// Default Steam Web API base URL.
pub const DEFAULT_STEAM_BASE_URL: &str = "https://api.steampowered.com";

/// Default per-request timeout. Steam's achievement endpoints are fast;
/// anything slower than this is treated as unavailable.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the Steam Web API achievement endpoints.
#[derive(Clone)]
pub struct SteamClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SteamClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Build a client from `STEAM_API_KEY` (required), `STEAM_API_BASE_URL`
    /// and `STEAM_HTTP_TIMEOUT_SECS` (optional).
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var("STEAM_API_KEY")?;
        let base_url = std::env::var("STEAM_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_STEAM_BASE_URL.to_string());
        let timeout_secs = std::env::var("STEAM_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self::with_timeout(&base_url, &api_key, timeout_secs))
    }

    /// Create client with a custom timeout.
    pub fn with_timeout(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AchievementSource for SteamClient {
    async fn game_achievements(&self, app_id: AppId) -> Result<Vec<Achievement>, SourceError> {
        let body: SchemaResponse = self
            .get_json(
                "/ISteamUserStats/GetSchemaForGame/v2/",
                &[
                    ("key", self.api_key.clone()),
                    ("appid", app_id.to_string()),
                ],
            )
            .await?;

        Ok(convert_catalog(body))
    }

    async fn player_unlocked(
        &self,
        steam_id: &SteamId,
        app_id: AppId,
    ) -> Result<HashSet<String>, SourceError> {
        let body: PlayerAchievementsResponse = self
            .get_json(
                "/ISteamUserStats/GetPlayerAchievements/v1/",
                &[
                    ("key", self.api_key.clone()),
                    ("steamid", steam_id.to_string()),
                    ("appid", app_id.to_string()),
                ],
            )
            .await?;

        Ok(convert_unlocked(body))
    }
}

/// Games without `availableGameStats` have no achievements; that is an empty
/// catalog, not an error.
fn convert_catalog(response: SchemaResponse) -> Vec<Achievement> {
    response
        .game
        .and_then(|g| g.available_game_stats)
        .map(|s| s.achievements)
        .unwrap_or_default()
        .into_iter()
        .map(|a| Achievement {
            name: a.name,
            display_name: a.display_name,
            description: a.description.unwrap_or_default(),
            icon_url: a.icon,
        })
        .collect()
}

fn convert_unlocked(response: PlayerAchievementsResponse) -> HashSet<String> {
    response
        .playerstats
        .map(|ps| ps.achievements)
        .unwrap_or_default()
        .into_iter()
        .filter(|a| a.achieved == 1)
        .map(|a| a.apiname)
        .collect()
}

// =============================================================================
// Steam Web API wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SchemaResponse {
    game: Option<SchemaGame>,
}

#[derive(Debug, Deserialize)]
struct SchemaGame {
    #[serde(rename = "availableGameStats")]
    available_game_stats: Option<SchemaGameStats>,
}

#[derive(Debug, Deserialize)]
struct SchemaGameStats {
    #[serde(default)]
    achievements: Vec<SchemaAchievement>,
}

#[derive(Debug, Deserialize)]
struct SchemaAchievement {
    name: String,
    #[serde(rename = "displayName", default)]
    display_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct PlayerAchievementsResponse {
    playerstats: Option<PlayerStats>,
}

#[derive(Debug, Deserialize)]
struct PlayerStats {
    #[serde(default)]
    achievements: Vec<PlayerAchievement>,
}

#[derive(Debug, Deserialize)]
struct PlayerAchievement {
    apiname: String,
    #[serde(default)]
    achieved: u8,
}
