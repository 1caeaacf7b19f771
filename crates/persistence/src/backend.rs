// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite connection setup and helpers.
//!
//! Everything here is SQLite-specific: connection initialization, embedded
//! migration execution, PRAGMA configuration, and the `last_insert_rowid()`
//! workaround. Domain queries and mutations stay in their own modules and
//! use Diesel DSL exclusively.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::StoreError;

/// Embedded schema migrations, applied on every connection.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Helper row struct for PRAGMA queries.
///
/// Raw SQL is justified here as Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Returns the row ID assigned by the most recent insert.
///
/// Raw SQL is justified here as Diesel has no direct API for
/// `last_insert_rowid()`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, StoreError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that foreign key enforcement is enabled.
///
/// Cascade deletion of a participant's events relies on the `events`
/// foreign key, so a connection without enforcement must be rejected
/// at startup.
///
/// # Errors
///
/// Returns `StoreError::ForeignKeyEnforcementNotEnabled` if the PRAGMA
/// reports enforcement off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(StoreError::ForeignKeyEnforcementNotEnabled);
    }

    Ok(())
}

/// Opens a `SQLite` database at the given URL, enables foreign keys, and
/// runs pending migrations.
///
/// # Errors
///
/// Returns an error if connection, PRAGMA setup, or migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, StoreError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Enables WAL mode for file-based databases.
///
/// WAL provides better read concurrency; in-memory databases do not need it.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
    Ok(())
}
