//! FiuFit Users - account, social graph and trainer certification service
//!
//! This crate owns user profiles, the follow graph, phone verification pins,
//! administrator accounts and the trainer certification workflow. Identity,
//! push notifications, metrics and WhatsApp delivery are remote collaborators
//! reached through ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
