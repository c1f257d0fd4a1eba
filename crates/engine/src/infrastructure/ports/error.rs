//! Error types surfaced by the infrastructure ports.

use thiserror::Error;

/// Errors from the user record store.
///
/// Never masked behind a successful-looking return: a rejected write means
/// the stored record is unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record already exists")]
    AlreadyExists,
    #[error("Concurrent update detected")]
    Conflict,
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn database(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Database(format!("{context}: {err}"))
    }
}

/// Errors from the achievement source.
///
/// Transport failures, timeouts, and unparseable bodies all land here; raw
/// HTTP client errors never propagate past the adapter.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Achievement source unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid response from achievement source: {0}")]
    InvalidResponse(String),
}
