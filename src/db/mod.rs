//! Database layer for foli
//!
//! Embedded SQLite store for [`Record`](crate::types::Record)s. The file
//! survives restarts; ids come from an `AUTOINCREMENT` key so they are never
//! reused, and SQLite serialises concurrent writers.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] - Database lifecycle, schema migrations
//! - [`records`] - Record save, scan, and field-match lookup

use sqlx::sqlite::SqlitePool;

mod migrations;
mod records;

/// Database handle for foli
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Database {
    pool: SqlitePool,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
