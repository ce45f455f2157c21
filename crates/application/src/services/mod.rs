//! Application services - Use case implementations

mod zone_facts;
mod zone_resolver;

pub use zone_facts::ZoneFactsService;
pub use zone_resolver::{ResolutionQuery, SAME_COUNTRY_BAND_DEGREES, ZoneResolver};
