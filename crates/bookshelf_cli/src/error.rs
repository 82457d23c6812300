//! Fatal CLI errors.

use bookshelf_core::{DbError, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors that end the program with a failure exit code.
#[derive(Debug)]
pub enum CliError {
    /// Catalog file could not be opened or prepared.
    Open(DbError),
    /// Repository could not be built over the opened connection.
    Repo(RepoError),
    /// Terminal read/write failure.
    Io(std::io::Error),
    /// Connection failed to close cleanly.
    Close(rusqlite::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open catalog: {err}"),
            Self::Repo(err) => write!(f, "cannot prepare catalog: {err}"),
            Self::Io(err) => write!(f, "terminal I/O failed: {err}"),
            Self::Close(err) => write!(f, "cannot close catalog: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Close(err) => Some(err),
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Open(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
