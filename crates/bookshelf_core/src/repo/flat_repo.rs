//! Flat-layout book repository and SQLite implementation.
//!
//! # Responsibility
//! - Provide add/find/list/delete over the denormalized `books` table.
//!
//! # Invariants
//! - `add_book` calls `Book::validate()` before inserting.
//! - Title arguments of `find_by_title` and `delete_by_title` pass the
//!   allow-list before any statement runs.
//! - Rows are returned in insertion (`rowid`) order.

use crate::db::CatalogLayout;
use crate::model::book::{Book, DeleteOutcome};
use crate::repo::{ensure_connection_ready, RepoResult};
use crate::validate::check_field;
use rusqlite::{params, Connection, Row};

const BOOK_SELECT_SQL: &str = "SELECT title, author, year, genre FROM books";

/// Repository interface for the flat catalog layout.
pub trait FlatBookRepository {
    /// Appends one row; identical rows are allowed.
    fn add_book(&self, book: &Book) -> RepoResult<()>;
    /// Returns every row whose title equals `title` exactly.
    fn find_by_title(&self, title: &str) -> RepoResult<Vec<Book>>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Removes every row whose title equals `title` exactly.
    fn delete_by_title(&self, title: &str) -> RepoResult<DeleteOutcome>;
    fn count_books(&self) -> RepoResult<u64>;
}

/// SQLite-backed flat book repository.
pub struct SqliteFlatBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFlatBookRepository<'conn> {
    /// Constructs a repository over a connection holding the flat layout.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, CatalogLayout::Flat)?;
        Ok(Self { conn })
    }
}

impl FlatBookRepository for SqliteFlatBookRepository<'_> {
    fn add_book(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        self.conn.execute(
            "INSERT INTO books (title, author, year, genre) VALUES (?1, ?2, ?3, ?4);",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.year.as_str(),
                book.genre.as_str(),
            ],
        )?;
        Ok(())
    }

    fn find_by_title(&self, title: &str) -> RepoResult<Vec<Book>> {
        check_field("title", title)?;

        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE title = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([title])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn delete_by_title(&self, title: &str) -> RepoResult<DeleteOutcome> {
        check_field("title", title)?;

        let changed = self
            .conn
            .execute("DELETE FROM books WHERE title = ?1;", [title])?;
        Ok(DeleteOutcome::from_affected(changed))
    }

    fn count_books(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
        Ok(count.unsigned_abs())
    }
}

// Columns are nullable in the flat layout; a NULL reads back as empty text.
fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        title: row.get::<_, Option<String>>("title")?.unwrap_or_default(),
        author: row.get::<_, Option<String>>("author")?.unwrap_or_default(),
        year: row.get::<_, Option<String>>("year")?.unwrap_or_default(),
        genre: row.get::<_, Option<String>>("genre")?.unwrap_or_default(),
    })
}
