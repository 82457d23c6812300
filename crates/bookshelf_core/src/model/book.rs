//! Book and genre records.
//!
//! # Responsibility
//! - Define flat-layout and genre-layout book records.
//! - Classify delete results by affected-row count.
//!
//! # Invariants
//! - `Book::validate()` gates every flat-layout write.
//! - `DeleteOutcome::Removed` always carries a count of at least one.

use crate::validate::{check_field, ValidationError};
use serde::{Deserialize, Serialize};

/// Surrogate key of a genre-layout book row.
pub type BookId = i64;

/// Surrogate key of a genre row.
pub type GenreId = i64;

/// Flat-layout book row. All fields are free text stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Kept as text, matching the `year TEXT` column.
    pub year: String,
    pub genre: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
        }
    }

    /// Checks all four fields against the flat-layout allow-list.
    ///
    /// Fields are checked in declaration order; the first rejection wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_field("title", &self.title)?;
        check_field("author", &self.author)?;
        check_field("year", &self.year)?;
        check_field("genre", &self.genre)?;
        Ok(())
    }
}

/// Input for adding a book to the genre layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGenreBook {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    /// Genre name; resolved to a `genres` row on insert.
    pub genre: String,
}

impl NewGenreBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        description: Option<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            description,
            genre: genre.into(),
        }
    }
}

/// Genre-layout book read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreBook {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub genre_id: Option<GenreId>,
    /// Resolved from `genres.name`; `None` when the book has no genre row.
    pub genre: Option<String>,
}

/// `(title, author)` projection returned by genre-layout search and list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    pub author: String,
}

/// Genre row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// How adding a book resolves its genre row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenrePolicy {
    /// Reuse the oldest genre row with the same exact name, or insert one.
    #[default]
    ReuseByName,
    /// Insert a fresh genre row for every added book.
    AlwaysInsert,
}

/// Result of deleting books by title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Number of rows removed; at least one.
    Removed(usize),
    NoMatch,
}

impl DeleteOutcome {
    pub fn from_affected(rows: usize) -> Self {
        if rows == 0 {
            Self::NoMatch
        } else {
            Self::Removed(rows)
        }
    }

    pub fn removed(self) -> usize {
        match self {
            Self::Removed(rows) => rows,
            Self::NoMatch => 0,
        }
    }
}
