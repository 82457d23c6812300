use bookshelf_core::{
    open_db_in_memory, Book, CatalogLayout, DeleteOutcome, FlatBookRepository,
    FlatCatalogService, RejectReason, RepoError, SqliteFlatBookRepository,
};
use rusqlite::Connection;

fn dune() -> Book {
    Book::new("Dune", "Herbert", "1965", "SciFi")
}

#[test]
fn add_then_search_returns_exact_row() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(&conn).unwrap());

    service.add_book(&dune()).unwrap();

    let hits = service.search_by_title("Dune").unwrap();
    assert_eq!(hits, vec![dune()]);
}

#[test]
fn search_is_exact_match_on_title() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(&conn).unwrap());
    service.add_book(&dune()).unwrap();
    service
        .add_book(&Book::new("Dune Messiah", "Herbert", "1969", "SciFi"))
        .unwrap();

    assert_eq!(service.search_by_title("Dune").unwrap().len(), 1);
    assert!(service.search_by_title("dune").unwrap().is_empty());
    assert!(service.search_by_title("Messiah").unwrap().is_empty());
}

#[test]
fn duplicate_adds_are_kept_and_deleted_together() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(&conn).unwrap());

    service.add_book(&dune()).unwrap();
    service.add_book(&dune()).unwrap();
    assert_eq!(service.list_books().unwrap().len(), 2);

    let outcome = service.delete_by_title("Dune").unwrap();
    assert_eq!(outcome, DeleteOutcome::Removed(2));
    assert!(service.list_books().unwrap().is_empty());
    assert!(service.search_by_title("Dune").unwrap().is_empty());
}

#[test]
fn deleting_unknown_title_reports_no_match_and_keeps_rows() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(&conn).unwrap());
    service.add_book(&dune()).unwrap();

    let outcome = service.delete_by_title("Emma").unwrap();
    assert_eq!(outcome, DeleteOutcome::NoMatch);
    assert_eq!(outcome.removed(), 0);
    assert_eq!(service.count_books().unwrap(), 1);
}

#[test]
fn list_count_tracks_adds_minus_removed_rows() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(&conn).unwrap());

    let titles = ["Dune", "Emma", "Dune", "Ulysses", "Beloved"];
    for title in titles {
        service
            .add_book(&Book::new(title, "Someone", "2000", "Fiction"))
            .unwrap();
    }

    let mut removed = 0;
    for title in ["Dune", "Nope", "Emma"] {
        removed += service.delete_by_title(title).unwrap().removed();
    }

    assert_eq!(removed, 3);
    assert_eq!(service.list_books().unwrap().len(), titles.len() - removed);
}

#[test]
fn list_preserves_insertion_order() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let repo = SqliteFlatBookRepository::try_new(&conn).unwrap();
    repo.add_book(&Book::new("Zebra", "A", "1", "X")).unwrap();
    repo.add_book(&Book::new("Apple", "B", "2", "Y")).unwrap();

    let titles: Vec<_> = repo
        .list_books()
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, ["Zebra", "Apple"]);
}

#[test]
fn apostrophe_in_title_is_rejected_before_storage() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(&conn).unwrap());

    let err = service
        .add_book(&Book::new("O'Brien's Tale", "Someone", "1999", "Drama"))
        .unwrap_err();
    match err {
        RepoError::Validation(validation) => {
            assert_eq!(validation.field, "title");
            assert_eq!(validation.reason, RejectReason::DisallowedCharacter('\''));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.count_books().unwrap(), 0);
}

#[test]
fn any_invalid_field_blocks_the_whole_add() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(&conn).unwrap());

    let rejected = [
        Book::new("Dune", "", "1965", "SciFi"),
        Book::new("Dune", "Herbert", "1965.", "SciFi"),
        Book::new("Dune", "Herbert", "1965", "Sci-Fi"),
    ];
    for book in &rejected {
        assert!(matches!(
            service.add_book(book),
            Err(RepoError::Validation(_))
        ));
    }
    assert_eq!(service.count_books().unwrap(), 0);
}

#[test]
fn search_and_delete_validate_title() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(&conn).unwrap());
    conn.execute(
        "INSERT INTO books VALUES ('Bad;Title', 'x', 'y', 'z');",
        [],
    )
    .unwrap();

    assert!(matches!(
        service.search_by_title("Bad;Title"),
        Err(RepoError::Validation(_))
    ));
    assert!(matches!(
        service.delete_by_title("Bad;Title"),
        Err(RepoError::Validation(_))
    ));
    assert!(matches!(
        service.delete_by_title(""),
        Err(RepoError::Validation(_))
    ));
    assert_eq!(service.count_books().unwrap(), 1);
}

#[test]
fn null_columns_read_back_as_empty_text() {
    let conn = open_db_in_memory(CatalogLayout::Flat).unwrap();
    conn.execute("INSERT INTO books (title) VALUES ('Lonely');", [])
        .unwrap();
    let repo = SqliteFlatBookRepository::try_new(&conn).unwrap();

    let books = repo.find_by_title("Lonely").unwrap();
    assert_eq!(books, vec![Book::new("Lonely", "", "", "")]);
}

#[test]
fn repository_rejects_connection_without_books_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteFlatBookRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("books"))
    ));
}

#[test]
fn repository_rejects_genre_layout_connection() {
    let conn = open_db_in_memory(CatalogLayout::Genre).unwrap();

    let result = SqliteFlatBookRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "books",
            column: "year"
        })
    ));
}
