//! Certification handlers.
//!
//! ## Commands
//! - Requesting a certification
//! - Approving or denying a certification
//! - Repairing a user's trainer flag
//!
//! ## Queries
//! - Listing certifications with owner and evidence video

mod create_certification;
mod details;
mod get_certifications;
mod reconcile_trainer_flag;
mod update_certification;

pub use details::CertificationDetails;

// Commands
pub use create_certification::{
    CreateCertificationCommand, CreateCertificationHandler, CreateCertificationResult,
};
pub use reconcile_trainer_flag::{
    ReconcileTrainerFlagCommand, ReconcileTrainerFlagHandler, ReconcileTrainerFlagResult,
};
pub use update_certification::{
    UpdateCertificationCommand, UpdateCertificationHandler, UpdateCertificationResult,
};

// Queries
pub use get_certifications::{
    GetCertificationsHandler, GetCertificationsQuery, GetCertificationsResult,
};
