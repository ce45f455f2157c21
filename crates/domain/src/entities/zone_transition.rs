//! Zone transition entity
//!
//! One rule in a zone's transition history: from the instant `at` onward
//! the given offset, DST flag and abbreviation apply, until the next
//! transition supersedes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UtcOffset;

/// A single transition in a zone's rule history
///
/// Sequences of transitions are strictly ascending by `at`; the rule in
/// effect at an instant is the last transition at or before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTransition {
    /// Instant the rule takes effect
    at: DateTime<Utc>,
    /// UTC offset valid from `at`
    offset: UtcOffset,
    /// Whether daylight saving is in effect from `at`
    dst: bool,
    /// Abbreviation valid from `at`, e.g. `GMT` or `BST`
    abbreviation: String,
}

impl ZoneTransition {
    /// Create a new transition rule
    #[must_use]
    pub const fn new(
        at: DateTime<Utc>,
        offset: UtcOffset,
        dst: bool,
        abbreviation: String,
    ) -> Self {
        Self {
            at,
            offset,
            dst,
            abbreviation,
        }
    }

    /// Instant the rule takes effect
    pub const fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// UTC offset valid from [`Self::at`]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Whether daylight saving is in effect from [`Self::at`]
    pub const fn is_dst(&self) -> bool {
        self.dst
    }

    /// Abbreviation valid from [`Self::at`]
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }
}
