//! Nominal offset value object
//!
//! The decimal-hours offset stored per catalog record. Display-only: it
//! feeds sorting and the `±HH:MM` label, never DST-aware offset math.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Largest nominal magnitude accepted, in hours
const MAX_MAGNITUDE_HOURS: f64 = 24.0;

/// A nominal UTC offset in decimal hours, e.g. `5.75` for `+05:45`
///
/// # Examples
///
/// ```
/// use domain::NominalOffset;
///
/// let offset = NominalOffset::new(5.75).unwrap();
/// assert_eq!(offset.formatted(), "+05:45");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NominalOffset(f64);

impl NominalOffset {
    /// Create a new nominal offset
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOffsetHours`] for non-finite values or
    /// magnitudes above 24 hours.
    pub fn new(hours: f64) -> Result<Self, DomainError> {
        if !hours.is_finite() || hours.abs() > MAX_MAGNITUDE_HOURS {
            return Err(DomainError::InvalidOffsetHours(hours));
        }
        Ok(Self(hours))
    }

    /// Get the offset in decimal hours
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.0
    }

    /// Render the `±HH:MM` label
    ///
    /// Sign from the value, integer hours zero-padded to two digits. The
    /// minutes field comes from the two fractional digits (after rounding
    /// to two decimals) multiplied by 60, truncated to its first two
    /// digits and right-padded with `0`. For the quarter-hour offsets real
    /// catalogs hold this is exact: `.25/.50/.75` map to `15/30/45`.
    #[must_use]
    pub fn formatted(&self) -> String {
        let rounded = (self.0 * 100.0).round() / 100.0;
        let sign = if rounded >= 0.0 { '+' } else { '-' };
        let magnitude = rounded.abs();
        #[allow(clippy::cast_possible_truncation)]
        let whole_hours = magnitude.trunc() as i64;
        #[allow(clippy::cast_possible_truncation)]
        let fraction_digits = ((magnitude.fract() * 100.0).round() as i64).clamp(0, 99);

        let product = (fraction_digits * 60).to_string();
        let mut minutes: String = product.chars().take(2).collect();
        while minutes.len() < 2 {
            minutes.push('0');
        }

        format!("{sign}{whole_hours:02}:{minutes}")
    }
}

impl fmt::Display for NominalOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl TryFrom<f64> for NominalOffset {
    type Error = DomainError;

    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Self::new(hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_quarter_hour() {
        assert_eq!(NominalOffset::new(5.75).unwrap().formatted(), "+05:45");
    }

    #[test]
    fn negative_half_hour() {
        assert_eq!(NominalOffset::new(-3.5).unwrap().formatted(), "-03:30");
    }

    #[test]
    fn whole_hours_pad_minutes() {
        assert_eq!(NominalOffset::new(11.0).unwrap().formatted(), "+11:00");
        assert_eq!(NominalOffset::new(-10.0).unwrap().formatted(), "-10:00");
    }

    #[test]
    fn zero_is_positive() {
        assert_eq!(NominalOffset::new(0.0).unwrap().formatted(), "+00:00");
    }

    #[test]
    fn quarter_hours() {
        assert_eq!(NominalOffset::new(9.25).unwrap().formatted(), "+09:15");
        assert_eq!(NominalOffset::new(-9.5).unwrap().formatted(), "-09:30");
        assert_eq!(NominalOffset::new(13.75).unwrap().formatted(), "+13:45");
    }

    #[test]
    fn single_digit_hours_pad_left() {
        assert_eq!(NominalOffset::new(1.0).unwrap().formatted(), "+01:00");
    }

    #[test]
    fn sub_hour_negative_offset() {
        assert_eq!(NominalOffset::new(-0.25).unwrap().formatted(), "-00:15");
    }

    #[test]
    fn truncate_then_right_pad_rule() {
        // fractional digits 05 -> 5 * 60 = 300 -> "30"
        assert_eq!(NominalOffset::new(0.05).unwrap().formatted(), "+00:30");
        // fractional digits 10 -> 600 -> "60"
        assert_eq!(NominalOffset::new(0.1).unwrap().formatted(), "+00:60");
    }

    #[test]
    fn display_matches_formatted() {
        let offset = NominalOffset::new(5.75).unwrap();
        assert_eq!(offset.to_string(), offset.formatted());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(NominalOffset::new(24.5).is_err());
        assert!(NominalOffset::new(-25.0).is_err());
        assert!(NominalOffset::new(f64::NAN).is_err());
        assert!(NominalOffset::new(f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_extremes() {
        assert!(NominalOffset::new(24.0).is_ok());
        assert!(NominalOffset::new(-24.0).is_ok());
        assert!(NominalOffset::new(14.0).is_ok());
    }

    #[test]
    fn serde_round_trip_is_transparent() {
        let offset = NominalOffset::new(5.75).unwrap();
        let json = serde_json::to_string(&offset).unwrap();
        assert_eq!(json, "5.75");
        let back: NominalOffset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, offset);
    }
}
