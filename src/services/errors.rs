use thiserror::Error;

use crate::domain::validation::ValidationError;
use crate::repository::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to the route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field-scoped input errors; reported back to the client.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// The resource does not exist or is hidden from the caller.
    #[error("resource not found")]
    NotFound,
    /// A write was rejected by a store constraint.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Unexpected failure of the store or its connection pool.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::ConstraintViolation(message) => Self::Conflict(message),
            other => Self::Internal(other.to_string()),
        }
    }
}
