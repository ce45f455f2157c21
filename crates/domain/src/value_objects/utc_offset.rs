//! UTC offset value object
//!
//! Signed offset from UTC in whole seconds, as recorded in zone transition
//! rules. Display output is the `±HHMM` wire form used wherever an offset
//! stands in for an abbreviation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Offsets of a full day or more are rejected
const MAX_MAGNITUDE_SECONDS: i32 = 24 * 3600;

/// A signed UTC offset in seconds
///
/// This is the DST-aware, authoritative offset attached to a transition
/// rule. The catalog's nominal decimal-hours offset is a display hint and a
/// different type on purpose.
///
/// # Examples
///
/// ```
/// use domain::UtcOffset;
///
/// let offset = UtcOffset::new(-5400).unwrap();
/// assert_eq!(offset.to_string(), "-0130");
/// assert_eq!(UtcOffset::new(0).unwrap().to_string(), "+0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// Create a new offset, validating the magnitude
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOffsetSeconds`] when the magnitude is a
    /// full day or more.
    pub const fn new(seconds: i32) -> Result<Self, DomainError> {
        if seconds <= -MAX_MAGNITUDE_SECONDS || seconds >= MAX_MAGNITUDE_SECONDS {
            return Err(DomainError::InvalidOffsetSeconds(seconds));
        }
        Ok(Self(seconds))
    }

    /// The zero offset
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the offset in seconds
    #[must_use]
    pub const fn seconds(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UtcOffset {
    /// Renders `±HHMM`: sign from the value (non-negative is `+`), then
    /// hours and minutes of the absolute value, each zero-padded to two
    /// digits. Leftover seconds below a minute are dropped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 >= 0 { '+' } else { '-' };
        let magnitude = self.0.unsigned_abs();
        let hours = magnitude / 3600;
        let minutes = (magnitude % 3600) / 60;
        write!(f, "{sign}{hours:02}{minutes:02}")
    }
}

impl TryFrom<i32> for UtcOffset {
    type Error = DomainError;

    fn try_from(seconds: i32) -> Result<Self, Self::Error> {
        Self::new(seconds)
    }
}
