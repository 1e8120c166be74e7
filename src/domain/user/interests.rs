//! Training interests a user can pick on their profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Closed set of interest tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interest {
    #[serde(rename = "strength")]
    Strength,
    #[serde(rename = "speed")]
    Speed,
    #[serde(rename = "endurance")]
    Endurance,
    #[serde(rename = "lose weight")]
    LoseWeight,
    #[serde(rename = "gain weight")]
    GainWeight,
    #[serde(rename = "sports")]
    Sports,
}

impl Interest {
    /// Every valid interest, in display order.
    pub const ALL: [Interest; 6] = [
        Interest::Strength,
        Interest::Speed,
        Interest::Endurance,
        Interest::LoseWeight,
        Interest::GainWeight,
        Interest::Sports,
    ];

    /// Storage/wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Strength => "strength",
            Interest::Speed => "speed",
            Interest::Endurance => "endurance",
            Interest::LoseWeight => "lose weight",
            Interest::GainWeight => "gain weight",
            Interest::Sports => "sports",
        }
    }

    /// Parses a list of raw tags, rejecting the whole list on the first unknown one.
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<BTreeSet<Interest>, ValidationError> {
        raw.iter().map(|s| s.as_ref().parse()).collect()
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interest::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("interests", format!("unknown interest '{}'", s)))
    }
}
