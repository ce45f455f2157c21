//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod catalog_store;
mod transition_provider;

#[cfg(test)]
pub use catalog_store::MockCatalogStore;
pub use catalog_store::{CatalogSelection, CatalogStore, SortDirection, SortKey};
#[cfg(test)]
pub use transition_provider::MockTransitionProvider;
pub use transition_provider::TransitionProvider;
