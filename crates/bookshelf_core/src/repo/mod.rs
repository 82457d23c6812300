//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per catalog layout.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Flat repository writes and title lookups enforce the allow-list first.
//! - Every statement is parameterized; user text never reaches SQL text.
//! - Repositories borrow an explicitly passed connection.

use crate::db::{CatalogLayout, DbError};
use crate::validate::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod flat_repo;
pub mod genre_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by both catalog layouts.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "connection is missing required column `{table}.{column}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::IncompatibleSchema {
                table,
                column: None,
                ..
            } => Self::MissingRequiredTable(table),
            DbError::IncompatibleSchema {
                table,
                column: Some(column),
                ..
            } => Self::MissingRequiredColumn { table, column },
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn ensure_connection_ready(conn: &Connection, layout: CatalogLayout) -> RepoResult<()> {
    crate::db::schema::verify_layout(conn, layout)?;
    Ok(())
}
