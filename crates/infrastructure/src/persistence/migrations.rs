//! Database migrations
//!
//! Manages database schema versioning and migrations. Migration SQL is
//! embedded here and applied in order at startup; the `schema_version`
//! table records the last applied version.
//!
//! ## Rollback Strategy
//!
//! Rollbacks are manual - if a migration fails:
//! 1. Check the error message for details
//! 2. Fix the underlying issue
//! 3. Manually repair the database if needed
//! 4. Re-run migrations
//!
//! ## Adding New Migrations
//!
//! 1. Increment `SCHEMA_VERSION` constant
//! 2. Add a new `migrate_vX` function
//! 3. Update `run_migrations` to call the new function

use domain::value_objects::strip_accents;
use rusqlite::{Connection, params};
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(version = 1, error = %e, "Migration V001 (zone catalog) failed");
                return Err(e);
            }
        }

        if current_version < 2 {
            if let Err(e) = migrate_v2(conn) {
                error!(version = 2, error = %e, "Migration V002 (place search key) failed");
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    // Create schema_version table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration to version 1: Zone catalog
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V001: Zone catalog");

    conn.execute_batch(
        "
        -- Zone catalog table, one row per place
        CREATE TABLE IF NOT EXISTS zones (
            zone_id TEXT PRIMARY KEY,
            country_code TEXT NOT NULL,
            country_name TEXT NOT NULL DEFAULT '',
            region_code TEXT NOT NULL DEFAULT '',
            region_name TEXT NOT NULL DEFAULT '',
            place_name TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            nominal_offset REAL NOT NULL
        );

        -- Indexes
        CREATE INDEX IF NOT EXISTS idx_zones_country ON zones(country_code);
        ",
    )?;

    Ok(())
}

/// Migration to version 2: Folded place search key and longitude index
fn migrate_v2(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V002: Place search key");

    conn.execute(
        "ALTER TABLE zones ADD COLUMN place_id TEXT NOT NULL DEFAULT ''",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_zones_longitude ON zones(longitude)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_zones_place_id ON zones(place_id)",
        [],
    )?;

    // Backfill the folded search key for rows imported before this version
    let mut stmt = conn.prepare("SELECT zone_id, place_name FROM zones WHERE place_id = ''")?;
    let pending = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    drop(stmt);

    for (zone_id, place_name) in pending {
        let folded = strip_accents(&place_name).to_lowercase();
        conn.execute(
            "UPDATE zones SET place_id = ?1 WHERE zone_id = ?2",
            params![folded, zone_id],
        )?;
    }

    Ok(())
}
