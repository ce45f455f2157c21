//! Catalog store port
//!
//! Defines the interface for read access to the zone catalog. Every
//! multi-record query returns a deterministic order so that distance
//! tie-breaks stay reproducible across calls and across backends.

use async_trait::async_trait;
use domain::entities::ZoneRecord;
use domain::value_objects::{CountryCode, ZoneId};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Columns a catalog listing may be ordered by
///
/// A closed whitelist; backends map each variant to their own column name,
/// so no caller-supplied string ever reaches a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Canonical zone identifier
    #[default]
    ZoneId,
    /// Display-only decimal-hours offset
    NominalOffset,
    /// Settlement display name
    PlaceName,
    /// Accent-folded search key of the place name
    PlaceId,
    /// Region/subdivision code
    RegionCode,
    /// Region/subdivision display name
    RegionName,
    /// Two-letter country code
    CountryCode,
    /// Country display name
    CountryName,
    /// Nominal latitude
    Latitude,
    /// Nominal longitude
    Longitude,
}

/// Direction of a catalog listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// Ordering requested for a full-catalog listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSelection {
    /// Column the listing is ordered by
    #[serde(default)]
    pub sort: SortKey,
    /// Direction of the ordering
    #[serde(default)]
    pub direction: SortDirection,
}

impl CatalogSelection {
    /// Create a selection with an explicit sort key and direction
    #[must_use]
    pub const fn new(sort: SortKey, direction: SortDirection) -> Self {
        Self { sort, direction }
    }
}

/// Port for read access to the zone catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All records for one country, ordered by zone identifier
    async fn zones_for_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<ZoneRecord>, ApplicationError>;

    /// The whole catalog, ordered by zone identifier
    async fn all_zones(&self) -> Result<Vec<ZoneRecord>, ApplicationError>;

    /// The record with exactly the given zone identifier, if any
    ///
    /// Absence is `Ok(None)`, never an error; errors mean the catalog
    /// itself failed.
    async fn find_zone(&self, zone_id: &ZoneId) -> Result<Option<ZoneRecord>, ApplicationError>;

    /// The whole catalog in the requested order
    ///
    /// The zone identifier is the implicit secondary key, so listings are
    /// totally ordered even when the requested column has duplicates.
    async fn list_zones(
        &self,
        selection: &CatalogSelection,
    ) -> Result<Vec<ZoneRecord>, ApplicationError>;
}
