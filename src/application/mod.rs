//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates domain operations across ports. Handlers are grouped by the
//! area they serve: accounts, the user directory with its follow graph, and
//! the certification workflow.

pub mod handlers;

pub use handlers::DEFAULT_SIDE_EFFECT_TIMEOUT;
