//! Genre catalog use-case service.
//!
//! # Responsibility
//! - Provide add/search/list/filter/delete entry points for the genre layout.
//! - Read created books back so callers see the stored genre reference.
//!
//! # Invariants
//! - `add_book` either returns the stored book or reports why it cannot.
//! - Log lines carry counts and ids only, never user-entered text.

use crate::model::book::{BookSummary, DeleteOutcome, GenreBook, NewGenreBook};
use crate::repo::genre_repo::GenreBookRepository;
use crate::repo::RepoResult;
use crate::service::CatalogServiceError;
use log::{debug, info};
use std::collections::BTreeSet;

/// Use-case service wrapper for the genre catalog.
pub struct GenreCatalogService<R: GenreBookRepository> {
    repo: R,
}

impl<R: GenreBookRepository> GenreCatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one book and its genre reference atomically.
    pub fn add_book(&mut self, book: &NewGenreBook) -> Result<GenreBook, CatalogServiceError> {
        let book_id = self.repo.add_book(book)?;
        let stored = self
            .repo
            .get_book(book_id)?
            .ok_or(CatalogServiceError::InconsistentState(
                "created book not found in read-back",
            ))?;
        info!(
            "event=book_add module=service layout=genre status=ok book_id={} genre_id={}",
            stored.id,
            stored.genre_id.map_or_else(|| "none".to_string(), |id| id.to_string())
        );
        Ok(stored)
    }

    /// Case-insensitive (ASCII) substring search over title and author.
    pub fn search(&self, keyword: &str) -> RepoResult<Vec<BookSummary>> {
        let hits = self.repo.search(keyword)?;
        debug!(
            "event=book_search module=service layout=genre status=ok hits={}",
            hits.len()
        );
        Ok(hits)
    }

    pub fn list_books(&self) -> RepoResult<Vec<BookSummary>> {
        self.repo.list_books()
    }

    /// Lists books whose genre name equals `genre` exactly.
    pub fn list_by_genre(&self, genre: &str) -> RepoResult<Vec<BookSummary>> {
        self.repo.list_by_genre(genre)
    }

    /// Distinct genre names, sorted. Duplicate genre rows collapse to one name.
    pub fn genre_names(&self) -> RepoResult<Vec<String>> {
        let names: BTreeSet<String> = self
            .repo
            .list_genres()?
            .into_iter()
            .map(|genre| genre.name)
            .collect();
        Ok(names.into_iter().collect())
    }

    /// Deletes every book with exactly this title. Genre rows are kept.
    pub fn delete_by_title(&self, title: &str) -> RepoResult<DeleteOutcome> {
        let outcome = self.repo.delete_by_title(title)?;
        info!(
            "event=book_delete module=service layout=genre status=ok removed={}",
            outcome.removed()
        );
        Ok(outcome)
    }

    pub fn count_books(&self) -> RepoResult<u64> {
        self.repo.count_books()
    }
}
