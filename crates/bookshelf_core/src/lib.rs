//! Core catalog logic for Bookshelf.
//! This crate is the single source of truth for storage and input invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use db::{open_db, open_db_in_memory, CatalogLayout, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{
    Book, BookId, BookSummary, DeleteOutcome, Genre, GenreBook, GenreId, GenrePolicy,
    NewGenreBook,
};
pub use repo::flat_repo::{FlatBookRepository, SqliteFlatBookRepository};
pub use repo::genre_repo::{GenreBookRepository, SqliteGenreBookRepository};
pub use repo::{RepoError, RepoResult};
pub use service::flat_service::FlatCatalogService;
pub use service::genre_service::GenreCatalogService;
pub use service::CatalogServiceError;
pub use validate::{check_field, is_allowed_text, RejectReason, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
