use bookshelf_core::{
    open_db_in_memory, BookSummary, CatalogLayout, CatalogServiceError, DeleteOutcome,
    GenreBookRepository, GenreCatalogService, GenrePolicy, NewGenreBook, RepoError,
    SqliteGenreBookRepository,
};
use rusqlite::Connection;

fn emma() -> NewGenreBook {
    NewGenreBook::new("Emma", "Austen", Some("desc".to_string()), "Romance")
}

fn summary(title: &str, author: &str) -> BookSummary {
    BookSummary {
        title: title.to_string(),
        author: author.to_string(),
    }
}

fn genre_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM genres;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn add_returns_stored_book_with_genre() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    let repo = SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::ReuseByName).unwrap();
    let mut service = GenreCatalogService::new(repo);

    let stored = service.add_book(&emma()).unwrap();
    assert!(stored.id > 0);
    assert_eq!(stored.title, "Emma");
    assert_eq!(stored.author, "Austen");
    assert_eq!(stored.description.as_deref(), Some("desc"));
    assert_eq!(stored.genre.as_deref(), Some("Romance"));
    assert!(stored.genre_id.is_some());
}

#[test]
fn list_by_genre_returns_added_pair() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    let repo = SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::default()).unwrap();
    let mut service = GenreCatalogService::new(repo);

    service.add_book(&emma()).unwrap();
    service
        .add_book(&NewGenreBook::new("Dune", "Herbert", None, "SciFi"))
        .unwrap();

    assert_eq!(
        service.list_by_genre("Romance").unwrap(),
        vec![summary("Emma", "Austen")]
    );
    assert!(service.list_by_genre("romance").unwrap().is_empty());
    assert!(service.list_by_genre("Horror").unwrap().is_empty());
}

#[test]
fn reuse_policy_keeps_one_genre_row_per_name() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    {
        let repo =
            SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::ReuseByName).unwrap();
        let mut service = GenreCatalogService::new(repo);
        let first = service.add_book(&emma()).unwrap();
        let second = service
            .add_book(&NewGenreBook::new("Persuasion", "Austen", None, "Romance"))
            .unwrap();
        assert_eq!(first.genre_id, second.genre_id);
        assert_eq!(service.list_by_genre("Romance").unwrap().len(), 2);
    }
    assert_eq!(genre_rows(&conn), 1);
}

#[test]
fn always_insert_policy_duplicates_genres_and_filter_still_matches() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    {
        let repo =
            SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::AlwaysInsert).unwrap();
        assert_eq!(repo.policy(), GenrePolicy::AlwaysInsert);
        let mut service = GenreCatalogService::new(repo);
        let first = service.add_book(&emma()).unwrap();
        let second = service
            .add_book(&NewGenreBook::new("Persuasion", "Austen", None, "Romance"))
            .unwrap();
        assert_ne!(first.genre_id, second.genre_id);

        assert_eq!(
            service.list_by_genre("Romance").unwrap(),
            vec![summary("Emma", "Austen"), summary("Persuasion", "Austen")]
        );
        assert_eq!(service.genre_names().unwrap(), vec!["Romance".to_string()]);
    }
    assert_eq!(genre_rows(&conn), 2);
}

#[test]
fn search_matches_substring_of_title_or_author() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    let repo = SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::default()).unwrap();
    let mut service = GenreCatalogService::new(repo);
    service.add_book(&emma()).unwrap();
    service
        .add_book(&NewGenreBook::new("Dune", "Herbert", None, "SciFi"))
        .unwrap();
    service
        .add_book(&NewGenreBook::new("Sense and Sensibility", "Austen", None, "Romance"))
        .unwrap();

    assert_eq!(
        service.search("Aust").unwrap(),
        vec![
            summary("Emma", "Austen"),
            summary("Sense and Sensibility", "Austen")
        ]
    );
    assert_eq!(service.search("une").unwrap(), vec![summary("Dune", "Herbert")]);
    // LIKE is ASCII case-insensitive by default.
    assert_eq!(service.search("HERB").unwrap().len(), 1);
    assert!(service.search("Tolstoy").unwrap().is_empty());
}

#[test]
fn search_treats_like_wildcards_literally() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    let repo = SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::default()).unwrap();
    let mut service = GenreCatalogService::new(repo);
    service
        .add_book(&NewGenreBook::new("100% Pure", "Someone", None, "Misc"))
        .unwrap();
    service
        .add_book(&NewGenreBook::new("1000 Pure", "Someone", None, "Misc"))
        .unwrap();

    assert_eq!(
        service.search("0%").unwrap(),
        vec![summary("100% Pure", "Someone")]
    );
    assert!(service.search("_Pure").unwrap().is_empty());
}

#[test]
fn unvalidated_input_is_accepted() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    let repo = SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::default()).unwrap();
    let mut service = GenreCatalogService::new(repo);

    let stored = service
        .add_book(&NewGenreBook::new(
            "O'Brien's Tale",
            "Flann O'Brien",
            None,
            "Satire",
        ))
        .unwrap();
    assert_eq!(stored.title, "O'Brien's Tale");
    assert_eq!(stored.description, None);
    assert_eq!(
        service.search("O'Brien").unwrap(),
        vec![summary("O'Brien's Tale", "Flann O'Brien")]
    );
}

#[test]
fn delete_removes_all_matching_books_but_keeps_genres() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    {
        let repo =
            SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::AlwaysInsert).unwrap();
        let mut service = GenreCatalogService::new(repo);
        service.add_book(&emma()).unwrap();
        service.add_book(&emma()).unwrap();

        assert_eq!(
            service.delete_by_title("Emma").unwrap(),
            DeleteOutcome::Removed(2)
        );
        assert_eq!(
            service.delete_by_title("Emma").unwrap(),
            DeleteOutcome::NoMatch
        );
        assert!(service.list_books().unwrap().is_empty());
        assert_eq!(service.count_books().unwrap(), 0);
    }
    assert_eq!(genre_rows(&conn), 2);
}

#[test]
fn failed_book_insert_rolls_back_genre_row() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_books BEFORE INSERT ON books
         BEGIN
            SELECT RAISE(ABORT, 'books are read-only');
         END;",
    )
    .unwrap();

    {
        let repo =
            SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::ReuseByName).unwrap();
        let mut service = GenreCatalogService::new(repo);
        let err = service.add_book(&emma()).unwrap_err();
        assert!(matches!(err, CatalogServiceError::Repo(RepoError::Db(_))));
    }

    assert_eq!(genre_rows(&conn), 0);
}

#[test]
fn get_book_returns_none_for_unknown_id() {
    let mut conn = open_db_in_memory(CatalogLayout::Genre).unwrap();
    let repo = SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::default()).unwrap();

    assert!(repo.get_book(42).unwrap().is_none());
}

#[test]
fn repository_rejects_flat_layout_connection() {
    let mut conn = open_db_in_memory(CatalogLayout::Flat).unwrap();

    let result = SqliteGenreBookRepository::try_new(&mut conn, GenrePolicy::default());
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("genres"))
    ));
}
