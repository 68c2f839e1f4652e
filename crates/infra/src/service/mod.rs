//! Application services: load an aggregate, run a command, apply the
//! resulting events and save, logging each applied event.

mod auth;
mod catalog;
mod slider;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use slider::SliderService;

use thiserror::Error;

use storefront_auth::AuthError;
use storefront_core::DomainError;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ServiceError {
    /// Missing records, whether reported by the domain or by storage.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::Domain(DomainError::NotFound) | ServiceError::Repository(RepositoryError::NotFound)
        )
    }

    /// Stale writes and duplicate creates.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ServiceError::Domain(DomainError::Conflict(_))
                | ServiceError::Repository(RepositoryError::Concurrency { .. })
                | ServiceError::Repository(RepositoryError::AlreadyExists)
        )
    }
}
