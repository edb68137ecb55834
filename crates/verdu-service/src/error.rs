//! # Service Error Taxonomy
//!
//! The boundary surfaces exactly four shapes: validation, not-found,
//! forbidden and persistence. Everything the lower layers can produce
//! collapses into one of them here, so callers never match on storage
//! internals.

use verdu_core::ValidationError;
use verdu_db::DbError;

/// Errors returned by boundary operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The input violates a business rule. Nothing was written.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The caller is not authorized for this operation.
    #[error("operation not authorized")]
    Forbidden,

    /// The storage layer failed for reasons unrelated to the input.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            // A stored-items mismatch on header-only update is the same
            // business rule as the create-time check
            DbError::TotalMismatch {
                provided_cents,
                computed_cents,
            } => ServiceError::Validation(ValidationError::TotalMismatch {
                provided_cents,
                computed_cents,
            }),
            other => ServiceError::Persistence(other.to_string()),
        }
    }
}

/// Result type for boundary operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_maps_to_service_not_found() {
        let err: ServiceError = DbError::not_found("sale", 42).into();
        assert!(matches!(
            err,
            ServiceError::NotFound { entity: "sale", id: 42 }
        ));
    }

    #[test]
    fn test_stored_total_mismatch_maps_to_validation() {
        let err: ServiceError = DbError::TotalMismatch {
            provided_cents: 100,
            computed_cents: 150,
        }
        .into();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::TotalMismatch {
                provided_cents: 100,
                computed_cents: 150,
            })
        ));
    }

    #[test]
    fn test_other_db_errors_map_to_persistence() {
        let err: ServiceError = DbError::UniqueViolation {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, ServiceError::Persistence(_)));
    }
}
