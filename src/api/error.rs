// ==========================================
// BOM Costing Engine - API error types
// ==========================================
// Translates repository errors into user-presentable failures. Every error
// is local and terminal for the operation that raised it; nothing retries.
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API layer errors.
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== Business rule errors =====
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Delete of an in-use material, or a write the store's constraints
    /// refuse.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Rejected before any store mutation.
    #[error("validation failed: {0}")]
    ValidationError(String),

    // ===== Data access errors =====
    #[error("database error: {0}")]
    DatabaseError(String),

    // ===== Generic errors =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={}) does not exist", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::ConstraintViolation(format!("unique constraint violated: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::ConstraintViolation(format!("foreign key constraint violated: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("field {}: {}", field, message))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("database lock failed: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::DatabaseTransactionError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result alias for the API layer.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_conversion() {
        let repo_err = RepositoryError::not_found("Material", 42);
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Material"));
                assert!(msg.contains("42"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_violation_becomes_constraint_violation() {
        let repo_err =
            RepositoryError::ForeignKeyViolation("FOREIGN KEY constraint failed".to_string());
        let api_err: ApiError = repo_err.into();
        assert!(matches!(api_err, ApiError::ConstraintViolation(_)));
    }
}
