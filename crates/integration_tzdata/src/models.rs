//! Raw transition data read from compiled zoneinfo files

use serde::{Deserialize, Serialize};

/// One offset rule extracted from a TZif file
///
/// A zone's history is a sequence of these, ascending by timestamp. The
/// first record always carries `i64::MIN` and describes the rule in
/// effect before the earliest real transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransition {
    /// Seconds since the Unix epoch at which the rule takes effect
    pub timestamp: i64,
    /// UTC offset in seconds valid from `timestamp` onward
    pub offset_secs: i32,
    /// Whether the rule is a daylight-saving rule
    pub dst: bool,
    /// Designation valid from `timestamp` onward, e.g. `GMT` or `BST`
    pub abbreviation: String,
}

impl RawTransition {
    /// Create a transition record
    #[must_use]
    pub fn new(timestamp: i64, offset_secs: i32, dst: bool, abbreviation: impl Into<String>) -> Self {
        Self {
            timestamp,
            offset_secs,
            dst,
            abbreviation: abbreviation.into(),
        }
    }
}
