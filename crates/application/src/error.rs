//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No catalog record or transition rule satisfied the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// The catalog store itself failed
    #[error("Catalog store error: {0}")]
    CatalogStore(String),

    /// The transition provider itself failed
    #[error("Transition provider error: {0}")]
    TransitionProvider(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error originated in an external collaborator
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ApplicationError::CatalogStore(_) | ApplicationError::TransitionProvider(_)
        )
    }
}
