//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Mean Earth radius used for distance queries, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates coordinates, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::out_of_range(
                "latitude",
                -90,
                90,
                latitude as i64,
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::out_of_range(
                "longitude",
                -180,
                180,
                longitude as i64,
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds coordinates from an optional pair; half a pair is invalid.
    pub fn from_pair(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, ValidationError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            (None, None) => Ok(None),
            _ => Err(ValidationError::invalid_format(
                "coordinates",
                "latitude and longitude must be provided together",
            )),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Haversine distance to another point, in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}
