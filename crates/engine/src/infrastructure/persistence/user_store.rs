//! SQLite-backed user streak storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use streakd_domain::{SteamId, UserStreakRecord};

use crate::infrastructure::ports::{StoreError, UserStore};

/// SQLite implementation of the user record store.
///
/// One row per user; timestamps stored as RFC 3339 UTC text. All writes go
/// through [`fmt_instant`], so the conditional `replace` can compare stored
/// text for equality.
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub async fn new(db_path: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| StoreError::database("users", e))?;
        Self::from_pool(pool).await
    }

    /// Ephemeral in-memory database, for tests.
    ///
    /// Capped to one connection: every pool connection to `:memory:` would
    /// otherwise get its own empty database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| StoreError::database("users", e))?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                steam_id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                current_streak INTEGER NOT NULL,
                longest_streak INTEGER NOT NULL,
                total_completions INTEGER NOT NULL,
                last_completion_at TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::database("users", e))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get(&self, steam_id: &SteamId) -> Result<Option<UserStreakRecord>, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE steam_id = ?")
            .bind(steam_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database("users", e))?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn create(&self, record: &UserStreakRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                steam_id, display_name, current_streak, longest_streak,
                total_completions, last_completion_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.steam_id.as_str())
        .bind(&record.display_name)
        .bind(i64::from(record.current_streak))
        .bind(i64::from(record.longest_streak))
        .bind(record.total_completions as i64)
        .bind(record.last_completion_at.map(fmt_instant))
        .bind(fmt_instant(record.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => StoreError::AlreadyExists,
            _ => StoreError::database("users", e),
        })?;

        Ok(())
    }

    async fn replace(
        &self,
        record: &UserStreakRecord,
        expected_last: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        // `IS` instead of `=` so a NULL expected value matches a NULL column.
        let result = sqlx::query(
            r#"
            UPDATE users SET
                display_name = ?,
                current_streak = ?,
                longest_streak = ?,
                total_completions = ?,
                last_completion_at = ?
            WHERE steam_id = ? AND last_completion_at IS ?
            "#,
        )
        .bind(&record.display_name)
        .bind(i64::from(record.current_streak))
        .bind(i64::from(record.longest_streak))
        .bind(record.total_completions as i64)
        .bind(record.last_completion_at.map(fmt_instant))
        .bind(record.steam_id.as_str())
        .bind(expected_last.map(fmt_instant))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("users", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict);
        }

        Ok(())
    }
}

fn fmt_instant(t: DateTime<Utc>) -> String {
    t.to_rfc3339()
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization(format!("bad timestamp '{raw}': {e}")))
}

fn record_from_row(row: &SqliteRow) -> Result<UserStreakRecord, StoreError> {
    let steam_id: String = row.get("steam_id");
    let steam_id = SteamId::new(steam_id).map_err(|e| StoreError::Serialization(e.to_string()))?;

    let last_completion_at = row
        .get::<Option<String>, _>("last_completion_at")
        .as_deref()
        .map(parse_instant)
        .transpose()?;
    let created_at = parse_instant(&row.get::<String, _>("created_at"))?;

    Ok(UserStreakRecord {
        steam_id,
        display_name: row.get("display_name"),
        current_streak: row.get::<i64, _>("current_streak") as u32,
        longest_streak: row.get::<i64, _>("longest_streak") as u32,
        total_completions: row.get::<i64, _>("total_completions") as u64,
        last_completion_at,
        created_at,
    })
}
