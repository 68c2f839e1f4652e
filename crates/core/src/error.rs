//! Domain error model.

use thiserror::Error;

/// Result type used by catalog, slider and auth domain logic.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic business failure.
///
/// Storage and transport failures are modelled by the infra crate and only
/// wrap this type, never the other way round.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input was rejected before touching state (blank name, duplicate option, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The command would break a rule of the aggregate (e.g. too many slides).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("not found")]
    NotFound,

    /// Duplicate creation, no-op transition or stale version.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
