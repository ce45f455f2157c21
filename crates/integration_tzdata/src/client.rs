//! Zoneinfo filesystem client
//!
//! Probes a configurable list of zoneinfo roots for compiled TZif files
//! and decodes them into raw transition sequences.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, instrument};

use crate::models::RawTransition;
use crate::tzif;

/// Errors from reading or decoding compiled zone data
#[derive(Debug, Error)]
pub enum TzdataError {
    /// No configured zoneinfo root carries a file for the zone
    #[error("No tzdata for zone: {0}")]
    ZoneNotFound(String),

    /// Zone name failed syntactic validation
    #[error("Invalid zone name: {0}")]
    InvalidZoneName(String),

    /// The data does not carry the TZif structure
    #[error("Not a TZif stream: {0}")]
    NotTzif(String),

    /// TZif version this reader does not understand
    #[error("Unsupported TZif version byte: {0}")]
    UnsupportedVersion(u8),

    /// Data ends before the declared record counts are satisfied
    #[error("Truncated TZif data")]
    Truncated,

    /// A time type points outside the designation block
    #[error("Designation index {0} out of range")]
    BadDesignation(usize),

    /// Reading a zone file failed for a reason other than absence
    #[error("I/O error: {0}")]
    Io(String),
}

/// Zoneinfo reader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TzdataConfig {
    /// Directories probed, in order, for compiled zone files
    #[serde(default = "default_zoneinfo_dirs")]
    pub zoneinfo_dirs: Vec<PathBuf>,
}

fn default_zoneinfo_dirs() -> Vec<PathBuf> {
    [
        "/usr/share/zoneinfo",
        "/usr/lib/zoneinfo",
        "/usr/share/lib/zoneinfo",
        "/etc/zoneinfo",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl Default for TzdataConfig {
    fn default() -> Self {
        Self {
            zoneinfo_dirs: default_zoneinfo_dirs(),
        }
    }
}

/// Source of raw per-zone transition data
#[async_trait]
pub trait TzdataSource: Send + Sync {
    /// Load a zone's transitions, ordered as stored on disk
    ///
    /// The sequence starts with a floor record at `i64::MIN` covering
    /// instants before the first real transition.
    async fn load_transitions(&self, zone: &str) -> Result<Vec<RawTransition>, TzdataError>;

    /// Check whether any configured zoneinfo root exists
    async fn is_available(&self) -> bool;
}

/// Filesystem reader over the compiled zoneinfo database
#[derive(Debug, Clone)]
pub struct ZoneinfoClient {
    config: TzdataConfig,
}

impl ZoneinfoClient {
    /// Create a client probing the roots in `config`
    #[must_use]
    pub const fn new(config: TzdataConfig) -> Self {
        Self { config }
    }

    /// Create a client probing the standard system locations
    #[must_use]
    pub fn with_default_roots() -> Self {
        Self::new(TzdataConfig::default())
    }

    /// Check that a zone name is safe to join onto a zoneinfo root
    ///
    /// Names are slash-separated segments of ASCII alphanumerics, `+`,
    /// `-` and `_`. Empty segments are rejected, which rules out
    /// absolute paths, and the charset rules out `.` and `..`.
    fn validate_zone_name(zone: &str) -> Result<(), TzdataError> {
        let well_formed = !zone.is_empty()
            && zone.split('/').all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_'))
            });
        if well_formed {
            Ok(())
        } else {
            Err(TzdataError::InvalidZoneName(zone.to_owned()))
        }
    }
}

#[async_trait]
impl TzdataSource for ZoneinfoClient {
    #[instrument(skip(self))]
    async fn load_transitions(&self, zone: &str) -> Result<Vec<RawTransition>, TzdataError> {
        Self::validate_zone_name(zone)?;

        for root in &self.config.zoneinfo_dirs {
            let path = root.join(zone);
            match fs::read(&path).await {
                Ok(bytes) => {
                    let transitions = tzif::parse(&bytes)?;
                    debug!(
                        path = %path.display(),
                        transitions = transitions.len(),
                        "Loaded zone file"
                    );
                    return Ok(transitions);
                }
                Err(error)
                    if matches!(
                        error.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                    ) => {}
                Err(error) => {
                    return Err(TzdataError::Io(format!("{}: {error}", path.display())));
                }
            }
        }

        Err(TzdataError::ZoneNotFound(zone.to_owned()))
    }

    async fn is_available(&self) -> bool {
        for root in &self.config.zoneinfo_dirs {
            if fs::metadata(root).await.is_ok() {
                return true;
            }
        }
        false
    }
}
