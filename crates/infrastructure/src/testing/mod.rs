//! Testing utilities for infrastructure tests.
//!
//! Builders for catalog test data, shared by the persistence test suites.

mod test_fixtures;

pub use test_fixtures::TestZoneRecord;
