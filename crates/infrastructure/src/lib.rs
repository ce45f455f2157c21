//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the SQLite catalog store, the zoneinfo-backed transition
//! provider, configuration loading and telemetry.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;
#[cfg(test)]
pub mod testing;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig};
pub use persistence::{ConnectionPool, SqliteCatalogStore, create_pool};
pub use telemetry::{TelemetryConfig, init_telemetry};
