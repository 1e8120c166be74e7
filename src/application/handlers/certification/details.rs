//! Certification enriched with its owner and evidence video.

use serde::Serialize;

use crate::domain::certification::Certification;
use crate::domain::user::PublicProfile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationDetails {
    #[serde(flatten)]
    pub certification: Certification,
    pub user: Option<PublicProfile>,
    pub video_url: Option<String>,
}
