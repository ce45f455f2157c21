//! Zone catalog record entity
//!
//! One row of the zone catalog: a place, the country and region it belongs
//! to, its nominal coordinates, and the zone identifier that keys the row.

use serde::{Deserialize, Serialize};

use crate::value_objects::{CountryCode, GeoLocation, NominalOffset, PlaceName, ZoneId};

/// A catalog entry mapping a place to its time zone
///
/// Records are read-only snapshots owned by the catalog store; the resolver
/// ranks them by coordinate deltas and hands back their identifiers. The
/// nominal offset is display metadata only and never feeds offset
/// derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Unique zone identifier, the primary key
    zone_id: ZoneId,
    /// Country the place belongs to
    country_code: CountryCode,
    /// Country display name
    country_name: String,
    /// Region/subdivision code, may be empty
    region_code: String,
    /// Region/subdivision display name, may be empty
    region_name: String,
    /// Place display name
    place_name: PlaceName,
    /// Lowercase accent-folded search key for the place
    place_id: String,
    /// Nominal location representing the zone
    location: GeoLocation,
    /// Display-only decimal-hours offset
    nominal_offset: NominalOffset,
}

impl ZoneRecord {
    /// Create a record with empty region/country names
    ///
    /// The search key is derived from the place name. Useful where only the
    /// resolution-relevant fields matter; display names can be attached via
    /// [`ZoneRecord::restore`] when rehydrating complete rows.
    #[must_use]
    pub fn new(
        zone_id: ZoneId,
        country_code: CountryCode,
        place_name: PlaceName,
        location: GeoLocation,
        nominal_offset: NominalOffset,
    ) -> Self {
        let place_id = place_name.search_key();
        Self {
            zone_id,
            country_code,
            country_name: String::new(),
            region_code: String::new(),
            region_name: String::new(),
            place_name,
            place_id,
            location,
            nominal_offset,
        }
    }

    /// Restore a record from storage with every field explicit
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn restore(
        zone_id: ZoneId,
        country_code: CountryCode,
        country_name: String,
        region_code: String,
        region_name: String,
        place_name: PlaceName,
        place_id: String,
        location: GeoLocation,
        nominal_offset: NominalOffset,
    ) -> Self {
        Self {
            zone_id,
            country_code,
            country_name,
            region_code,
            region_name,
            place_name,
            place_id,
            location,
            nominal_offset,
        }
    }

    /// Get the zone identifier
    pub const fn zone_id(&self) -> &ZoneId {
        &self.zone_id
    }

    /// Get the country code
    pub const fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    /// Get the country display name
    pub fn country_name(&self) -> &str {
        &self.country_name
    }

    /// Get the region code
    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    /// Get the region display name
    pub fn region_name(&self) -> &str {
        &self.region_name
    }

    /// Get the place name
    pub const fn place_name(&self) -> &PlaceName {
        &self.place_name
    }

    /// Get the place search key
    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    /// Get the nominal location
    pub const fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Get the nominal display offset
    pub const fn nominal_offset(&self) -> &NominalOffset {
        &self.nominal_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ZoneRecord {
        ZoneRecord::new(
            ZoneId::new("Europe/Zurich").unwrap(),
            CountryCode::new("CH").unwrap(),
            PlaceName::new("Zürich").unwrap(),
            GeoLocation::new(47.3769, 8.5417).unwrap(),
            NominalOffset::new(1.0).unwrap(),
        )
    }

    #[test]
    fn new_derives_place_id_from_name() {
        let record = sample();
        assert_eq!(record.place_id(), "zurich");
    }

    #[test]
    fn new_leaves_display_names_empty() {
        let record = sample();
        assert_eq!(record.country_name(), "");
        assert_eq!(record.region_code(), "");
        assert_eq!(record.region_name(), "");
    }

    #[test]
    fn restore_keeps_every_field() {
        let record = ZoneRecord::restore(
            ZoneId::new("America/New_York").unwrap(),
            CountryCode::new("US").unwrap(),
            "United States".to_string(),
            "NY".to_string(),
            "New York".to_string(),
            PlaceName::new("New York City").unwrap(),
            "new york city".to_string(),
            GeoLocation::new(40.7128, -74.006).unwrap(),
            NominalOffset::new(-5.0).unwrap(),
        );

        assert_eq!(record.zone_id().as_str(), "America/New_York");
        assert_eq!(record.country_code().as_str(), "US");
        assert_eq!(record.country_name(), "United States");
        assert_eq!(record.region_code(), "NY");
        assert_eq!(record.region_name(), "New York");
        assert_eq!(record.place_name().as_str(), "New York City");
        assert_eq!(record.place_id(), "new york city");
        assert!((record.location().latitude() - 40.7128).abs() < f64::EPSILON);
        assert_eq!(record.nominal_offset().formatted(), "-05:00");
    }

    #[test]
    fn serde_round_trip() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: ZoneRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
