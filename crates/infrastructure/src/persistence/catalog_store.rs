//! SQLite zone catalog store
//!
//! Implements the `CatalogStore` port over the `zones` table.

use std::str::FromStr;
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{CatalogSelection, CatalogStore, SortDirection, SortKey};
use async_trait::async_trait;
use domain::entities::ZoneRecord;
use domain::value_objects::{CountryCode, GeoLocation, NominalOffset, PlaceName, ZoneId};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument, warn};

use super::connection::ConnectionPool;

/// Column list shared by every catalog query, in `row_to_record` order
const SELECT_COLUMNS: &str = "zone_id, country_code, country_name, region_code, region_name, \
                              place_name, place_id, latitude, longitude, nominal_offset";

/// SQLite-based zone catalog store
#[derive(Debug, Clone)]
pub struct SqliteCatalogStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteCatalogStore {
    /// Create a new SQLite catalog store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Upsert catalog rows inside one transaction
    ///
    /// Zone identifiers missing from the bundled IANA list are imported
    /// anyway; a warning flags likely typos in the source data.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn import_records(&self, records: &[ZoneRecord]) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let records = records.to_vec();

        task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;
            let tx = conn
                .transaction()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            for record in &records {
                if chrono_tz::Tz::from_str(record.zone_id().as_str()).is_err() {
                    warn!(zone = %record.zone_id(), "Zone identifier not in bundled IANA list");
                }
                tx.execute(
                    "INSERT INTO zones (zone_id, country_code, country_name, region_code,
                                        region_name, place_name, place_id, latitude, longitude,
                                        nominal_offset)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                     ON CONFLICT(zone_id) DO UPDATE SET
                         country_code = excluded.country_code,
                         country_name = excluded.country_name,
                         region_code = excluded.region_code,
                         region_name = excluded.region_name,
                         place_name = excluded.place_name,
                         place_id = excluded.place_id,
                         latitude = excluded.latitude,
                         longitude = excluded.longitude,
                         nominal_offset = excluded.nominal_offset",
                    params![
                        record.zone_id().as_str(),
                        record.country_code().as_str(),
                        record.country_name(),
                        record.region_code(),
                        record.region_name(),
                        record.place_name().as_str(),
                        record.place_id(),
                        record.location().latitude(),
                        record.location().longitude(),
                        record.nominal_offset().hours(),
                    ],
                )
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;
            }

            tx.commit()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            debug!(written = records.len(), "Imported zone records");
            Ok(records.len())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

/// Convert a database row to a `ZoneRecord`
fn row_to_record(row: &Row<'_>) -> Result<ZoneRecord, rusqlite::Error> {
    let zone_id_str: String = row.get(0)?;
    let country_str: String = row.get(1)?;
    let country_name: String = row.get(2)?;
    let region_code: String = row.get(3)?;
    let region_name: String = row.get(4)?;
    let place_name_str: String = row.get(5)?;
    let place_id: String = row.get(6)?;
    let latitude: f64 = row.get(7)?;
    let longitude: f64 = row.get(8)?;
    let nominal_offset: f64 = row.get(9)?;

    let zone_id = ZoneId::new(zone_id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let country_code = CountryCode::new(country_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let place_name = PlaceName::new(place_name_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let location = GeoLocation::new(latitude, longitude).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Real, Box::new(e))
    })?;
    let nominal_offset = NominalOffset::new(nominal_offset).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Real, Box::new(e))
    })?;

    Ok(ZoneRecord::restore(
        zone_id,
        country_code,
        country_name,
        region_code,
        region_name,
        place_name,
        place_id,
        location,
        nominal_offset,
    ))
}

/// Column backing each sort key; a fixed set, never caller input
const fn sort_column(sort: SortKey) -> &'static str {
    match sort {
        SortKey::ZoneId => "zone_id",
        SortKey::NominalOffset => "nominal_offset",
        SortKey::PlaceName => "place_name",
        SortKey::PlaceId => "place_id",
        SortKey::RegionCode => "region_code",
        SortKey::RegionName => "region_name",
        SortKey::CountryCode => "country_code",
        SortKey::CountryName => "country_name",
        SortKey::Latitude => "latitude",
        SortKey::Longitude => "longitude",
    }
}

const fn direction_sql(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    #[instrument(skip(self), fields(country = %country))]
    async fn zones_for_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<ZoneRecord>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let country_str = country.as_str().to_owned();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            let sql =
                format!("SELECT {SELECT_COLUMNS} FROM zones WHERE country_code = ?1 ORDER BY zone_id");
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;
            let records = stmt
                .query_map([&country_str], row_to_record)
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            debug!(count = records.len(), "Listed zones for country");
            Ok(records)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn all_zones(&self) -> Result<Vec<ZoneRecord>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            let sql = format!("SELECT {SELECT_COLUMNS} FROM zones ORDER BY zone_id");
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;
            let records = stmt
                .query_map([], row_to_record)
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            debug!(count = records.len(), "Listed full catalog");
            Ok(records)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(zone = %zone_id))]
    async fn find_zone(&self, zone_id: &ZoneId) -> Result<Option<ZoneRecord>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let zone_str = zone_id.as_str().to_owned();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            let sql = format!("SELECT {SELECT_COLUMNS} FROM zones WHERE zone_id = ?1");
            let record = conn
                .query_row(&sql, [&zone_str], row_to_record)
                .optional()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            debug!(found = record.is_some(), "Looked up zone");
            Ok(record)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(sort = ?selection.sort, direction = ?selection.direction))]
    async fn list_zones(
        &self,
        selection: &CatalogSelection,
    ) -> Result<Vec<ZoneRecord>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let selection = *selection;

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            // Zone identifier as the secondary key keeps listings totally
            // ordered when the requested column has duplicates
            let sql = format!(
                "SELECT {SELECT_COLUMNS} FROM zones ORDER BY {column} {direction}, zone_id ASC",
                column = sort_column(selection.sort),
                direction = direction_sql(selection.direction),
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;
            let records = stmt
                .query_map([], row_to_record)
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::CatalogStore(e.to_string()))?;

            debug!(count = records.len(), "Listed ordered catalog");
            Ok(records)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::persistence::create_pool;
    use crate::testing::TestZoneRecord;

    fn setup_store() -> SqliteCatalogStore {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
            run_migrations: true,
        };
        let pool = create_pool(&config).unwrap();
        SqliteCatalogStore::new(Arc::new(pool))
    }

    fn sample_catalog() -> Vec<ZoneRecord> {
        vec![
            TestZoneRecord::new("Europe/Berlin")
                .with_country("DE")
                .with_place("Berlin")
                .with_location(52.52, 13.405)
                .with_nominal_offset(1.0)
                .build(),
            TestZoneRecord::new("Europe/Busingen")
                .with_country("DE")
                .with_place("Büsingen")
                .with_location(47.7, 8.69)
                .with_nominal_offset(1.0)
                .build(),
            TestZoneRecord::new("Europe/Paris")
                .with_country("FR")
                .with_place("Paris")
                .with_location(48.8566, 2.3522)
                .with_nominal_offset(1.0)
                .build(),
            TestZoneRecord::new("Pacific/Kiritimati")
                .with_country("KI")
                .with_place("Kiritimati")
                .with_location(1.87, -157.43)
                .with_nominal_offset(14.0)
                .build(),
        ]
    }

    #[tokio::test]
    async fn import_and_find_zone() {
        let store = setup_store();
        store.import_records(&sample_catalog()).await.unwrap();

        let found = store
            .find_zone(&ZoneId::new("Europe/Berlin").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.country_code().as_str(), "DE");
        assert_eq!(found.place_name().as_str(), "Berlin");
        assert!((found.location().latitude() - 52.52).abs() < 1e-9);
    }

    #[tokio::test]
    async fn find_missing_zone_returns_none() {
        let store = setup_store();
        store.import_records(&sample_catalog()).await.unwrap();

        let found = store
            .find_zone(&ZoneId::new("Mars/Olympus").unwrap())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn zones_for_country_filters_and_orders() {
        let store = setup_store();
        store.import_records(&sample_catalog()).await.unwrap();

        let german = store
            .zones_for_country(&CountryCode::new("DE").unwrap())
            .await
            .unwrap();

        let ids: Vec<&str> = german.iter().map(|r| r.zone_id().as_str()).collect();
        assert_eq!(ids, ["Europe/Berlin", "Europe/Busingen"]);
    }

    #[tokio::test]
    async fn all_zones_in_zone_id_order() {
        let store = setup_store();
        store.import_records(&sample_catalog()).await.unwrap();

        let all = store.all_zones().await.unwrap();

        let ids: Vec<&str> = all.iter().map(|r| r.zone_id().as_str()).collect();
        assert_eq!(
            ids,
            [
                "Europe/Berlin",
                "Europe/Busingen",
                "Europe/Paris",
                "Pacific/Kiritimati"
            ]
        );
    }

    #[tokio::test]
    async fn list_zones_sorts_by_longitude_descending() {
        let store = setup_store();
        store.import_records(&sample_catalog()).await.unwrap();

        let selection = CatalogSelection::new(SortKey::Longitude, SortDirection::Descending);
        let listed = store.list_zones(&selection).await.unwrap();

        let ids: Vec<&str> = listed.iter().map(|r| r.zone_id().as_str()).collect();
        assert_eq!(
            ids,
            [
                "Europe/Berlin",
                "Europe/Busingen",
                "Europe/Paris",
                "Pacific/Kiritimati"
            ]
        );
    }

    #[tokio::test]
    async fn list_zones_breaks_duplicate_keys_by_zone_id() {
        let store = setup_store();
        store.import_records(&sample_catalog()).await.unwrap();

        // Three records share nominal offset 1.0
        let selection = CatalogSelection::new(SortKey::NominalOffset, SortDirection::Ascending);
        let listed = store.list_zones(&selection).await.unwrap();

        let ids: Vec<&str> = listed.iter().map(|r| r.zone_id().as_str()).collect();
        assert_eq!(
            ids,
            [
                "Europe/Berlin",
                "Europe/Busingen",
                "Europe/Paris",
                "Pacific/Kiritimati"
            ]
        );
    }

    #[tokio::test]
    async fn import_upserts_existing_zone() {
        let store = setup_store();
        store.import_records(&sample_catalog()).await.unwrap();

        let replacement = TestZoneRecord::new("Europe/Paris")
            .with_country("FR")
            .with_place("Marseille")
            .with_location(43.2965, 5.3698)
            .with_nominal_offset(1.0)
            .build();
        store.import_records(&[replacement]).await.unwrap();

        let all = store.all_zones().await.unwrap();
        let paris = store
            .find_zone(&ZoneId::new("Europe/Paris").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(paris.place_name().as_str(), "Marseille");
        assert_eq!(paris.place_id(), "marseille");
    }

    #[tokio::test]
    async fn unknown_zone_identifiers_still_import() {
        let store = setup_store();
        let record = TestZoneRecord::new("Atlantis/Poseidonis")
            .with_country("AA")
            .build();

        let written = store.import_records(&[record]).await.unwrap();

        assert_eq!(written, 1);
    }
}
