//! HTTP DTOs for certification endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::certification::CertificationDetails;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCertificationRequest {
    pub user_id: String,
}

/// Query string of `GET /certifications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificationsQuery {
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCertificationQuery {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCertificationResponse {
    #[serde(flatten)]
    pub certification: CertificationDetails,
    /// False when the request repeated the current decision.
    pub changed: bool,
}
