//! HTTP adapter for the trainer certification workflow.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{certification_admin_routes, certification_routes};
