//! Compiled zoneinfo (TZif) integration
//!
//! Reads timezone transition history from the system zoneinfo database
//! (RFC 8536 TZif files, <https://www.rfc-editor.org/rfc/rfc8536>).
//! Works offline against any installed tzdata release.

pub mod client;
mod models;
mod tzif;

pub use client::{TzdataConfig, TzdataError, TzdataSource, ZoneinfoClient};
pub use models::RawTransition;
