//! Mapping of sqlx failures into domain errors.

use questboard_core::error::DomainError;
use tracing::error;

/// Wraps a database error as `DomainError::Infrastructure`, logging it.
pub(crate) fn infrastructure(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |err| {
        error!(operation, error = %err, "database operation failed");
        DomainError::Infrastructure(format!("{operation}: {err}"))
    }
}
