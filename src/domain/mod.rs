//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, paging, errors)
//! - `user` - User directory profiles
//! - `follow` - Follow graph edges
//! - `certification` - Trainer certification workflow
//! - `verification` - Phone verification pins
//! - `admin` - Administrator accounts
//! - `metrics` - Business events for the metrics service

pub mod admin;
pub mod certification;
pub mod follow;
pub mod foundation;
pub mod metrics;
pub mod user;
pub mod verification;
