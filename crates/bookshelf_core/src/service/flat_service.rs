//! Flat catalog use-case service.
//!
//! # Responsibility
//! - Provide add/search/list/delete entry points for the flat layout.
//! - Delegate validation and persistence to the repository.
//!
//! # Invariants
//! - Service APIs never bypass repository allow-list checks.
//! - Log lines carry counts only, never user-entered text.

use crate::model::book::{Book, DeleteOutcome};
use crate::repo::flat_repo::FlatBookRepository;
use crate::repo::RepoResult;
use log::{debug, info};

/// Use-case service wrapper for the flat catalog.
pub struct FlatCatalogService<R: FlatBookRepository> {
    repo: R,
}

impl<R: FlatBookRepository> FlatCatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one book after allow-list validation of all four fields.
    pub fn add_book(&self, book: &Book) -> RepoResult<()> {
        self.repo.add_book(book)?;
        info!("event=book_add module=service layout=flat status=ok");
        Ok(())
    }

    /// Exact-title search. An empty result means no such title.
    pub fn search_by_title(&self, title: &str) -> RepoResult<Vec<Book>> {
        let books = self.repo.find_by_title(title)?;
        debug!(
            "event=book_search module=service layout=flat status=ok hits={}",
            books.len()
        );
        Ok(books)
    }

    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    /// Deletes every book with exactly this title.
    ///
    /// Returns `DeleteOutcome::NoMatch` when nothing was removed.
    pub fn delete_by_title(&self, title: &str) -> RepoResult<DeleteOutcome> {
        let outcome = self.repo.delete_by_title(title)?;
        info!(
            "event=book_delete module=service layout=flat status=ok removed={}",
            outcome.removed()
        );
        Ok(outcome)
    }

    pub fn count_books(&self) -> RepoResult<u64> {
        self.repo.count_books()
    }
}
