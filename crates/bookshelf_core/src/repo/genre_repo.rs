//! Genre-layout book repository and SQLite implementation.
//!
//! # Responsibility
//! - Provide add/search/list/delete over `books` + `genres`.
//! - Own the genre-resolution step of `add_book` with atomic semantics.
//!
//! # Invariants
//! - Genre resolution and book insert commit together or not at all.
//! - Keyword search matches the keyword literally (LIKE wildcards escaped).
//! - Genre filtering joins on name equality, so duplicate genre rows with the
//!   same name all match.
//! - Deleting books never removes genre rows.

use crate::db::CatalogLayout;
use crate::model::book::{
    BookId, BookSummary, DeleteOutcome, Genre, GenreBook, GenreId, GenrePolicy, NewGenreBook,
};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

/// Repository interface for the genre catalog layout.
pub trait GenreBookRepository {
    /// Resolves the genre row and inserts the book in one transaction.
    fn add_book(&mut self, book: &NewGenreBook) -> RepoResult<BookId>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<GenreBook>>;
    /// Substring match of `keyword` over title or author.
    fn search(&self, keyword: &str) -> RepoResult<Vec<BookSummary>>;
    fn list_books(&self) -> RepoResult<Vec<BookSummary>>;
    /// Books whose genre row carries exactly `genre` as its name.
    fn list_by_genre(&self, genre: &str) -> RepoResult<Vec<BookSummary>>;
    /// Every genre row in id order, duplicates included.
    fn list_genres(&self) -> RepoResult<Vec<Genre>>;
    fn delete_by_title(&self, title: &str) -> RepoResult<DeleteOutcome>;
    fn count_books(&self) -> RepoResult<u64>;
}

/// SQLite-backed genre book repository.
pub struct SqliteGenreBookRepository<'conn> {
    conn: &'conn mut Connection,
    policy: GenrePolicy,
}

impl<'conn> SqliteGenreBookRepository<'conn> {
    /// Constructs a repository over a connection holding the genre layout.
    pub fn try_new(conn: &'conn mut Connection, policy: GenrePolicy) -> RepoResult<Self> {
        ensure_connection_ready(conn, CatalogLayout::Genre)?;
        Ok(Self { conn, policy })
    }

    pub fn policy(&self) -> GenrePolicy {
        self.policy
    }
}

impl GenreBookRepository for SqliteGenreBookRepository<'_> {
    fn add_book(&mut self, book: &NewGenreBook) -> RepoResult<BookId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let genre_id = resolve_genre_in_tx(&tx, book.genre.as_str(), self.policy)?;
        tx.execute(
            "INSERT INTO books (title, author, description, genre_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.description.as_deref(),
                genre_id,
            ],
        )?;
        let book_id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(book_id)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<GenreBook>> {
        let book = self
            .conn
            .query_row(
                "SELECT
                    b.id AS id,
                    b.title AS title,
                    b.author AS author,
                    b.description AS description,
                    b.genre_id AS genre_id,
                    g.name AS genre
                 FROM books b
                 LEFT JOIN genres g ON g.id = b.genre_id
                 WHERE b.id = ?1;",
                [id],
                |row| {
                    Ok(GenreBook {
                        id: row.get("id")?,
                        title: row.get("title")?,
                        author: row.get("author")?,
                        description: row.get("description")?,
                        genre_id: row.get("genre_id")?,
                        genre: row.get("genre")?,
                    })
                },
            )
            .optional()?;
        Ok(book)
    }

    fn search(&self, keyword: &str) -> RepoResult<Vec<BookSummary>> {
        let pattern = format!("%{}%", escape_like(keyword));
        query_summaries(
            self.conn,
            "SELECT title, author
             FROM books
             WHERE title LIKE ?1 ESCAPE '\\'
                OR author LIKE ?1 ESCAPE '\\'
             ORDER BY id ASC;",
            [pattern.as_str()],
        )
    }

    fn list_books(&self) -> RepoResult<Vec<BookSummary>> {
        query_summaries(
            self.conn,
            "SELECT title, author FROM books ORDER BY id ASC;",
            [],
        )
    }

    fn list_by_genre(&self, genre: &str) -> RepoResult<Vec<BookSummary>> {
        query_summaries(
            self.conn,
            "SELECT b.title AS title, b.author AS author
             FROM books b
             INNER JOIN genres g ON g.id = b.genre_id
             WHERE g.name = ?1
             ORDER BY b.id ASC;",
            [genre],
        )
    }

    fn list_genres(&self) -> RepoResult<Vec<Genre>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM genres ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut genres = Vec::new();
        while let Some(row) = rows.next()? {
            genres.push(Genre {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }
        Ok(genres)
    }

    fn delete_by_title(&self, title: &str) -> RepoResult<DeleteOutcome> {
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

fn resolve_genre_in_tx(
    tx: &Transaction<'_>,
    name: &str,
    policy: GenrePolicy,
) -> RepoResult<GenreId> {
    if policy == GenrePolicy::ReuseByName {
        let existing: Option<GenreId> = tx
            .query_row(
                "SELECT id FROM genres WHERE name = ?1 ORDER BY id ASC LIMIT 1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = existing {
            return Ok(id);
        }
    }

    tx.execute("INSERT INTO genres (name) VALUES (?1);", [name])?;
    Ok(tx.last_insert_rowid())
}

fn query_summaries<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> RepoResult<Vec<BookSummary>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_summary_row(row)?);
    }
    Ok(items)
}

fn parse_summary_row(row: &Row<'_>) -> RepoResult<BookSummary> {
    Ok(BookSummary {
        title: row.get("title")?,
        author: row.get("author")?,
    })
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
