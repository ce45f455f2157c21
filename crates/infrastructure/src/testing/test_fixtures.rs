//! Test fixtures for zone catalog testing.
//!
//! Provides convenient builders for creating test data.

#![allow(clippy::unwrap_used)]

use domain::entities::ZoneRecord;
use domain::value_objects::{CountryCode, GeoLocation, NominalOffset, PlaceName, ZoneId};

/// Builder for creating test zone records.
#[derive(Debug, Clone)]
pub struct TestZoneRecord {
    zone_id: String,
    country: String,
    country_name: Option<String>,
    region_code: Option<String>,
    region_name: Option<String>,
    place: Option<String>,
    latitude: f64,
    longitude: f64,
    nominal_offset: f64,
}

impl TestZoneRecord {
    /// Create a builder keyed by the given zone identifier.
    #[must_use]
    pub fn new(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            country: "AA".to_string(),
            country_name: None,
            region_code: None,
            region_name: None,
            place: None,
            latitude: 0.0,
            longitude: 0.0,
            nominal_offset: 0.0,
        }
    }

    /// Set the country code.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Set the country display name.
    #[must_use]
    pub fn with_country_name(mut self, name: impl Into<String>) -> Self {
        self.country_name = Some(name.into());
        self
    }

    /// Set the region code and display name.
    #[must_use]
    pub fn with_region(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.region_code = Some(code.into());
        self.region_name = Some(name.into());
        self
    }

    /// Set the place display name.
    #[must_use]
    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    /// Set the nominal coordinates.
    #[must_use]
    pub const fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Set the display-only decimal-hours offset.
    #[must_use]
    pub const fn with_nominal_offset(mut self, hours: f64) -> Self {
        self.nominal_offset = hours;
        self
    }

    /// Build the record.
    ///
    /// Without an explicit place the last zone-identifier segment is used,
    /// with underscores turned into spaces.
    #[must_use]
    pub fn build(self) -> ZoneRecord {
        let place = self.place.unwrap_or_else(|| {
            self.zone_id
                .rsplit('/')
                .next()
                .unwrap_or(&self.zone_id)
                .replace('_', " ")
        });
        let place_name = PlaceName::new(place).unwrap();
        let place_id = place_name.search_key();

        ZoneRecord::restore(
            ZoneId::new(self.zone_id).unwrap(),
            CountryCode::new(self.country).unwrap(),
            self.country_name.unwrap_or_default(),
            self.region_code.unwrap_or_default(),
            self.region_name.unwrap_or_default(),
            place_name,
            place_id,
            GeoLocation::new(self.latitude, self.longitude).unwrap(),
            NominalOffset::new(self.nominal_offset).unwrap(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_derive_place_from_zone_id() {
        let record = TestZoneRecord::new("America/New_York").build();

        assert_eq!(record.zone_id().as_str(), "America/New_York");
        assert_eq!(record.country_code().as_str(), "AA");
        assert_eq!(record.place_name().as_str(), "New York");
        assert_eq!(record.place_id(), "new york");
    }

    #[test]
    fn test_explicit_fields_are_kept() {
        let record = TestZoneRecord::new("Europe/Zurich")
            .with_country("CH")
            .with_country_name("Switzerland")
            .with_region("ZH", "Zurich")
            .with_place("Zürich")
            .with_location(47.3769, 8.5417)
            .with_nominal_offset(1.0)
            .build();

        assert_eq!(record.country_name(), "Switzerland");
        assert_eq!(record.region_code(), "ZH");
        assert_eq!(record.place_name().as_str(), "Zürich");
        assert_eq!(record.place_id(), "zurich");
        assert_eq!(record.nominal_offset().formatted(), "+01:00");
    }
}
