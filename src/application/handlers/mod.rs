//! Use case handlers, one struct per operation.
//!
//! Each handler owns `Arc`s of the ports it needs and exposes a single
//! `handle(cmd).await`. Business failures come back as the module's error
//! enum; best-effort side effects never fail a handler.

pub mod account;
pub mod certification;
pub(crate) mod side_effects;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use side_effects::DEFAULT_SIDE_EFFECT_TIMEOUT;
