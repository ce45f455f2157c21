//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid zone identifier syntax
    #[error("Invalid zone identifier: {0}")]
    InvalidZoneId(String),

    /// Invalid country code
    #[error("Invalid country code: {0}")]
    InvalidCountryCode(String),

    /// Coordinates outside the valid ranges
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// UTC offset outside the representable range
    #[error("Invalid UTC offset: {0} seconds")]
    InvalidOffsetSeconds(i32),

    /// Nominal offset outside the representable range
    #[error("Invalid nominal offset: {0} hours")]
    InvalidOffsetHours(f64),

    /// Place name empty or unprintable
    #[error("Invalid place name: {0}")]
    InvalidPlaceName(String),

    /// Resolution query missing required parameters
    #[error("Invalid resolution query: {0}")]
    InvalidQuery(String),
}

impl DomainError {
    /// Create an invalid-coordinates error
    pub const fn invalid_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinates {
            latitude,
            longitude,
        }
    }
}
