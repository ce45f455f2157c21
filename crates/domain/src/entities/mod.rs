//! Domain entities - Objects with identity and lifecycle

mod zone_record;
mod zone_transition;

pub use zone_record::ZoneRecord;
pub use zone_transition::ZoneTransition;
