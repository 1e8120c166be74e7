//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, paging types and error types
//! that form the vocabulary of the users domain.

mod errors;
mod ids;
mod pagination;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use ids::{AdminId, CertificationId, UserId};
pub use pagination::{Page, Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
