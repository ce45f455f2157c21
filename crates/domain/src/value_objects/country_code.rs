//! Country code value object

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A two-letter country code, normalized to uppercase
///
/// Country matching throughout the catalog is case-insensitive; normalizing
/// at construction makes plain equality sufficient everywhere else.
///
/// # Examples
///
/// ```
/// use domain::CountryCode;
///
/// let code = CountryCode::new("gb").unwrap();
/// assert_eq!(code.as_str(), "GB");
/// assert!(CountryCode::new("GBR").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct CountryCode {
    #[validate(length(equal = 2))]
    value: String,
}

impl CountryCode {
    /// Create a new country code, validating length and charset
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCountryCode`] unless the trimmed input
    /// is exactly two ASCII letters.
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let raw = code.into();
        let value = raw.trim().to_uppercase();

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|_| DomainError::InvalidCountryCode(raw.clone()))?;

        if !candidate.value.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidCountryCode(raw));
        }

        Ok(candidate)
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CountryCode {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
