//! Nearest-zone resolution service
//!
//! Selects the best-matching catalog record for a coordinate pair, with a
//! same-country preference band and a global longitude-then-latitude
//! fallback. Distances are plain per-axis absolute differences in decimal
//! degrees, never geodesic: callers depend on exactly which zone this
//! ranking picks, so the approximation is part of the contract.

use std::sync::Arc;

use domain::DomainError;
use domain::entities::ZoneRecord;
use domain::value_objects::{CountryCode, GeoLocation, ZoneId};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{CatalogSelection, CatalogStore};

/// Width in degrees of the longitude band used for same-country matching
///
/// A country spanning many zones could otherwise match a same-country
/// record on the far side of the globe; the band keeps the restricted
/// search inside a plausible neighborhood.
pub const SAME_COUNTRY_BAND_DEGREES: f64 = 15.0;

/// A single nearest-zone request
///
/// Coordinates are mandatory; both search stages rank candidates by
/// coordinate distance. The country code is an optional preference, not a
/// hard filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionQuery {
    location: GeoLocation,
    country: Option<CountryCode>,
}

impl ResolutionQuery {
    /// Create a query for the given coordinates
    #[must_use]
    pub const fn new(location: GeoLocation) -> Self {
        Self {
            location,
            country: None,
        }
    }

    /// Restrict the primary search stage to one country
    #[must_use]
    pub fn with_country(mut self, country: CountryCode) -> Self {
        self.country = Some(country);
        self
    }

    /// Build a query from loose caller input
    ///
    /// An absent or empty country string means "no country preference".
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidQuery`] when either coordinate is missing;
    /// coordinate and country validation failures pass through.
    pub fn from_parts(
        country: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, DomainError> {
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(DomainError::InvalidQuery(
                "latitude and longitude are required".to_string(),
            ));
        };
        let location = GeoLocation::new(latitude, longitude)?;
        let country = match country.map(str::trim) {
            None | Some("") => None,
            Some(code) => Some(CountryCode::new(code)?),
        };
        Ok(Self { location, country })
    }

    /// Coordinates candidates are ranked against
    #[must_use]
    pub const fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Country preference, if any
    #[must_use]
    pub const fn country(&self) -> Option<&CountryCode> {
        self.country.as_ref()
    }
}

/// Service selecting the catalog record nearest to a query
pub struct ZoneResolver<C: CatalogStore> {
    catalog: Arc<C>,
}

impl<C: CatalogStore> Clone for ZoneResolver<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<C: CatalogStore> std::fmt::Debug for ZoneResolver<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneResolver")
            .field("catalog", &"<CatalogStore>")
            .finish()
    }
}

impl<C: CatalogStore> ZoneResolver<C> {
    /// Create a new resolver over the given catalog
    pub const fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Select the zone nearest to the query
    ///
    /// With a country preference, candidates of that country inside the
    /// longitude band are ranked by longitude distance first. When that
    /// stage yields nothing (no country given, unknown country, or no
    /// candidate within the band), the whole catalog is ranked by
    /// longitude distance, then latitude distance. Ties keep the first
    /// candidate in catalog order, which the store guarantees to be
    /// deterministic.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::NotFound`] when the catalog is empty; store
    /// failures propagate unchanged.
    #[instrument(skip(self))]
    pub async fn resolve_nearest(
        &self,
        query: &ResolutionQuery,
    ) -> Result<ZoneId, ApplicationError> {
        if let Some(country) = query.country() {
            if let Some(record) = self.nearest_in_country(country, query.location()).await? {
                debug!(zone = %record.zone_id(), country = %country, "Resolved within country band");
                return Ok(record.zone_id().clone());
            }
        }

        let location = query.location();
        let candidates = self.catalog.all_zones().await?;
        let nearest = candidates.into_iter().min_by(|a, b| {
            location
                .longitude_delta_to(a.location())
                .total_cmp(&location.longitude_delta_to(b.location()))
                .then_with(|| {
                    location
                        .latitude_delta_to(a.location())
                        .total_cmp(&location.latitude_delta_to(b.location()))
                })
        });

        nearest.map_or_else(
            || {
                Err(ApplicationError::NotFound(
                    "failed to determine nearest timezone".to_string(),
                ))
            },
            |record| {
                debug!(zone = %record.zone_id(), "Resolved via global fallback");
                Ok(record.zone_id().clone())
            },
        )
    }

    /// Whether a catalog record with exactly this identifier exists
    ///
    /// No prefix or partial matching.
    #[instrument(skip(self))]
    pub async fn validate_zone(&self, zone_id: &ZoneId) -> Result<bool, ApplicationError> {
        Ok(self.catalog.find_zone(zone_id).await?.is_some())
    }

    /// The full catalog record for the identifier, when present
    ///
    /// Absence is `Ok(None)`; only a failing catalog is an error.
    #[instrument(skip(self))]
    pub async fn zone_info(
        &self,
        zone_id: &ZoneId,
    ) -> Result<Option<ZoneRecord>, ApplicationError> {
        self.catalog.find_zone(zone_id).await
    }

    /// Every catalog record in the requested order
    #[instrument(skip(self))]
    pub async fn list_zones(
        &self,
        selection: &CatalogSelection,
    ) -> Result<Vec<ZoneRecord>, ApplicationError> {
        self.catalog.list_zones(selection).await
    }

    /// Nearest same-country record inside the longitude band, if any
    async fn nearest_in_country(
        &self,
        country: &CountryCode,
        location: &GeoLocation,
    ) -> Result<Option<ZoneRecord>, ApplicationError> {
        let candidates = self.catalog.zones_for_country(country).await?;
        Ok(candidates
            .into_iter()
            .filter(|record| {
                location.longitude_delta_to(record.location()) < SAME_COUNTRY_BAND_DEGREES
            })
            .min_by(|a, b| {
                location
                    .longitude_delta_to(a.location())
                    .total_cmp(&location.longitude_delta_to(b.location()))
            }))
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn from_parts_accepts_any_valid_coordinates(
            latitude in -90.0f64..=90.0,
            longitude in -180.0f64..=180.0,
        ) {
            let query = ResolutionQuery::from_parts(None, Some(latitude), Some(longitude)).unwrap();
            prop_assert!((query.location().latitude() - latitude).abs() < f64::EPSILON);
            prop_assert!((query.location().longitude() - longitude).abs() < f64::EPSILON);
        }

        #[test]
        fn from_parts_never_panics(
            country in proptest::option::of("\\PC{0,4}"),
            latitude in proptest::option::of(proptest::num::f64::ANY),
            longitude in proptest::option::of(proptest::num::f64::ANY),
        ) {
            let _ = ResolutionQuery::from_parts(country.as_deref(), latitude, longitude);
        }
    }
}
