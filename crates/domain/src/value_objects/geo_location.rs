//! Geographic location value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A geographic location with latitude and longitude in decimal degrees
///
/// Separations between locations are per-axis absolute differences, not
/// great-circle distance: nearest-zone ranking is defined over longitude
/// and latitude deltas taken independently, and resolution results depend
/// on exactly that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCoordinates`] if latitude is not in
    /// [-90, 90] or longitude is not in [-180, 180]. Non-finite values fall
    /// outside both ranges and are rejected the same way.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_coordinates(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in
    /// [-180, 180].
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Absolute longitude difference to another location, in degrees
    ///
    /// Plain numeric difference with no wrap-around at the antimeridian:
    /// longitudes 170 and -170 are 340 degrees apart here.
    #[must_use]
    pub fn longitude_delta_to(&self, other: &Self) -> f64 {
        (self.longitude - other.longitude).abs()
    }

    /// Absolute latitude difference to another location, in degrees
    #[must_use]
    pub fn latitude_delta_to(&self, other: &Self) -> f64 {
        (self.latitude - other.latitude).abs()
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
