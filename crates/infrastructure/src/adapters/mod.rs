//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod tzdata_adapter;

pub use tzdata_adapter::TzdataTransitionProvider;
