//! Value Objects - Immutable, identity-less domain primitives

mod country_code;
mod geo_location;
mod nominal_offset;
mod place_name;
mod utc_offset;
mod zone_id;

pub use country_code::CountryCode;
pub use geo_location::GeoLocation;
pub use nominal_offset::NominalOffset;
pub use place_name::{PlaceName, strip_accents};
pub use utc_offset::UtcOffset;
pub use zone_id::ZoneId;
