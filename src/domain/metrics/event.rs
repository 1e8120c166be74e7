use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::certification::CertificationStatus;
use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::user::Coordinates;

/// How a user signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMethod {
    Mail,
    FederatedEntity,
}

impl LoginMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginMethod::Mail => "mail",
            LoginMethod::FederatedEntity => "federated_entity",
        }
    }
}

impl FromStr for LoginMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mail" => Ok(LoginMethod::Mail),
            "federated_entity" => Ok(LoginMethod::FederatedEntity),
            other => Err(ValidationError::invalid_format(
                "method",
                format!("unknown login method '{}'", other),
            )),
        }
    }
}

impl fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A business event. Serialized as a `(metric_type, sub_type)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricEvent {
    Register,
    Login(LoginMethod),
    PasswordRecover,
    Location(Coordinates),
    Blocked,
    UserFollowed(UserId),
    CertificationOutcome(CertificationStatus),
}

impl MetricEvent {
    pub fn metric_type(&self) -> &'static str {
        match self {
            MetricEvent::Register => "register",
            MetricEvent::Login(_) => "login",
            MetricEvent::PasswordRecover => "password_recover",
            MetricEvent::Location(_) => "location",
            MetricEvent::Blocked => "blocked",
            MetricEvent::UserFollowed(_) => "user_followed",
            MetricEvent::CertificationOutcome(_) => "certification",
        }
    }

    pub fn sub_type(&self) -> String {
        match self {
            MetricEvent::Login(method) => method.as_str().to_string(),
            // Rounded to ~1 km so nearby updates bucket together.
            MetricEvent::Location(c) => format!("{:.2},{:.2}", c.latitude(), c.longitude()),
            MetricEvent::UserFollowed(followed) => followed.to_string(),
            MetricEvent::CertificationOutcome(status) => status.as_str().to_string(),
            MetricEvent::Register | MetricEvent::PasswordRecover | MetricEvent::Blocked => {
                String::new()
            }
        }
    }
}
