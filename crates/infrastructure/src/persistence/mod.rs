//! Persistence module
//!
//! SQLite-based storage for the zone catalog.

pub mod catalog_store;
pub mod connection;
pub mod migrations;

pub use catalog_store::SqliteCatalogStore;
pub use connection::{ConnectionPool, DatabaseError, create_pool};
