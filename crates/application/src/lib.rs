//! Application layer - Use cases and orchestration
//!
//! Contains the nearest-zone resolution and zone-facts services, and the
//! port definitions their collaborators implement. Orchestrates domain
//! objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
