//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - profiles and the follow graph
//! - `PostgresCertificationRepository` - certification requests
//! - `PostgresVerificationPinRepository` - one pending pin per user
//! - `PostgresAdminRepository` - administrator accounts
//!
//! Schema lives in `migrations/`.

mod admin_repository;
mod certification_repository;
mod pin_repository;
mod user_repository;

pub use admin_repository::PostgresAdminRepository;
pub use certification_repository::PostgresCertificationRepository;
pub use pin_repository::PostgresVerificationPinRepository;
pub use user_repository::PostgresUserRepository;

use crate::domain::foundation::{DomainError, ErrorCode, Pagination};

/// Wraps a sqlx failure with the action that was attempted.
fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(action, error = %e, "Database operation failed");
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// Name of the unique/exclusion constraint a write violated, if any.
fn violated_constraint(e: &sqlx::Error) -> Option<&str> {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

/// LIMIT and OFFSET bind values for a page.
fn page_bounds(pagination: Pagination) -> (i64, i64) {
    (pagination.limit() as i64, pagination.offset() as i64)
}

fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
