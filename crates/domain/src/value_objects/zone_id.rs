//! Zone identifier value object
//!
//! Provides a validated IANA-style time-zone identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Longest identifier accepted; real tz database names stay well below this
const MAX_LENGTH: usize = 64;

/// A canonical time-zone identifier such as `Europe/London`
///
/// Validation is purely syntactic: slash-separated segments of ASCII
/// letters, digits, `+`, `-` and `_`, at most [`MAX_LENGTH`] characters.
/// Whether the identifier names a zone the catalog or the rule source
/// actually knows is decided by those collaborators, not here. The charset
/// also guarantees an identifier can never escape a zoneinfo directory when
/// joined onto a path.
///
/// # Examples
///
/// ```
/// use domain::ZoneId;
///
/// let zone = ZoneId::new("Europe/London").unwrap();
/// assert_eq!(zone.as_str(), "Europe/London");
/// assert!(ZoneId::new("Europe//London").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Create a new zone identifier, validating the syntax
    ///
    /// Surrounding whitespace is trimmed; case is preserved because zone
    /// identifiers are case-sensitive keys.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidZoneId`] for empty input, input longer
    /// than [`MAX_LENGTH`], empty segments or characters outside the
    /// identifier charset.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidZoneId("empty identifier".to_string()));
        }
        if trimmed.len() > MAX_LENGTH {
            return Err(DomainError::InvalidZoneId(format!(
                "identifier exceeds {MAX_LENGTH} characters"
            )));
        }
        if trimmed.split('/').any(str::is_empty) {
            return Err(DomainError::InvalidZoneId(format!(
                "empty segment in {trimmed:?}"
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '/' | '+' | '-' | '_'))
        {
            return Err(DomainError::InvalidZoneId(format!(
                "unexpected character {bad:?} in {trimmed:?}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The segments of the identifier, e.g. `["Europe", "London"]`
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ZoneId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ZoneId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for ZoneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
