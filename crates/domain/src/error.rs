use thiserror::Error;

/// Validation errors for domain identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid Steam ID (expected 17 digits): {0}")]
    InvalidSteamId(String),
    #[error("invalid App ID (expected a positive integer): {0}")]
    InvalidAppId(String),
}
