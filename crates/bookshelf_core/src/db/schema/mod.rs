//! Catalog layouts and their table checks.
//!
//! # Responsibility
//! - Register the SQL script for each catalog layout.
//! - Create missing tables idempotently and verify the resulting shape.
//!
//! # Invariants
//! - Existing tables are checked before anything is created, so opening a
//!   file with the wrong layout fails without writing to it.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;
use std::fmt::{Display, Formatter};

/// Storage layout of a catalog database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogLayout {
    /// Single denormalized `books(title, author, year, genre)` table.
    #[default]
    Flat,
    /// `books` rows referencing a separate `genres` table.
    Genre,
}

#[derive(Debug, Clone, Copy)]
struct TableShape {
    name: &'static str,
    columns: &'static [&'static str],
}

const FLAT_TABLES: &[TableShape] = &[TableShape {
    name: "books",
    columns: &["title", "author", "year", "genre"],
}];

const GENRE_TABLES: &[TableShape] = &[
    TableShape {
        name: "genres",
        columns: &["id", "name"],
    },
    TableShape {
        name: "books",
        columns: &["id", "title", "author", "description", "genre_id"],
    },
];

impl CatalogLayout {
    fn sql(self) -> &'static str {
        match self {
            Self::Flat => include_str!("flat.sql"),
            Self::Genre => include_str!("genre.sql"),
        }
    }

    fn tables(self) -> &'static [TableShape] {
        match self {
            Self::Flat => FLAT_TABLES,
            Self::Genre => GENRE_TABLES,
        }
    }
}

impl Display for CatalogLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => f.write_str("flat"),
            Self::Genre => f.write_str("genre"),
        }
    }
}

/// Creates the layout's tables when absent and verifies their columns.
pub fn ensure_layout(conn: &Connection, layout: CatalogLayout) -> DbResult<()> {
    for table in layout.tables() {
        if table_exists(conn, table.name)? {
            check_columns(conn, layout, table)?;
        }
    }

    conn.execute_batch(layout.sql())?;
    verify_layout(conn, layout)
}

/// Verifies every table and column of `layout` exists, without creating anything.
pub fn verify_layout(conn: &Connection, layout: CatalogLayout) -> DbResult<()> {
    for table in layout.tables() {
        if !table_exists(conn, table.name)? {
            return Err(DbError::IncompatibleSchema {
                layout,
                table: table.name,
                column: None,
            });
        }
        check_columns(conn, layout, table)?;
    }
    Ok(())
}

fn check_columns(conn: &Connection, layout: CatalogLayout, table: &TableShape) -> DbResult<()> {
    for column in table.columns {
        if !table_has_column(conn, table.name, column)? {
            return Err(DbError::IncompatibleSchema {
                layout,
                table: table.name,
                column: Some(column),
            });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
