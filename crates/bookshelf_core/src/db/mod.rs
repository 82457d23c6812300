//! SQLite storage bootstrap and catalog layout entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the book catalog.
//! - Ensure the selected catalog layout exists before any data access.
//!
//! # Invariants
//! - Layout creation is idempotent (`CREATE TABLE IF NOT EXISTS`).
//! - Core code must not read/write catalog data before the layout is verified.
//! - Flat and genre layouts are mutually incompatible; there is no migration.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::CatalogLayout;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file holds tables that do not match the requested layout.
    IncompatibleSchema {
        layout: CatalogLayout,
        table: &'static str,
        column: Option<&'static str>,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::IncompatibleSchema {
                layout,
                table,
                column: Some(column),
            } => write!(
                f,
                "database is not a {layout} catalog: table `{table}` has no column `{column}`"
            ),
            Self::IncompatibleSchema {
                layout,
                table,
                column: None,
            } => write!(
                f,
                "database is not a {layout} catalog: table `{table}` is missing"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::IncompatibleSchema { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
