//! Interactive menu loops for both catalog layouts.
//!
//! # Responsibility
//! - Read a menu choice, collect the command's fields, call the service and
//!   print the result.
//! - Keep going after per-command failures; stop on the exit command or when
//!   input is exhausted.
//!
//! # Invariants
//! - Storage failures and input rejections are always printed.
//! - Only terminal I/O failures end the loop with an error.

use crate::console::Console;
use crate::menu::{FlatCommand, GenreCommand, MenuCommand};
use bookshelf_core::{
    Book, BookSummary, DeleteOutcome, FlatBookRepository, FlatCatalogService,
    GenreBookRepository, GenreCatalogService, NewGenreBook, RepoError,
};
use log::{debug, warn};
use std::error::Error;
use std::io::{self, BufRead, Write};

const CHOICE_PROMPT: &str = "Enter your choice: ";
const CANCELLED: &str = "Input cancelled; nothing was saved.";

/// Why a menu loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ExitCommand,
    InputClosed,
}

pub fn run_flat<R, I, O>(
    service: &FlatCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<SessionEnd>
where
    R: FlatBookRepository,
    I: BufRead,
    O: Write,
{
    loop {
        let Some(command) = next_command::<FlatCommand, _, _>(console, "flat")? else {
            return Ok(SessionEnd::InputClosed);
        };
        match command {
            FlatCommand::Add => flat_add(service, console)?,
            FlatCommand::Search => flat_search(service, console)?,
            FlatCommand::Delete => flat_delete(service, console)?,
            FlatCommand::List => flat_list(service, console)?,
            FlatCommand::Exit => return Ok(SessionEnd::ExitCommand),
        }
    }
}

pub fn run_genre<R, I, O>(
    service: &mut GenreCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<SessionEnd>
where
    R: GenreBookRepository,
    I: BufRead,
    O: Write,
{
    loop {
        let Some(command) = next_command::<GenreCommand, _, _>(console, "genre")? else {
            return Ok(SessionEnd::InputClosed);
        };
        match command {
            GenreCommand::Add => genre_add(service, console)?,
            GenreCommand::Search => genre_search(service, console)?,
            GenreCommand::List => genre_list(service, console)?,
            GenreCommand::ListByGenre => genre_list_by_genre(service, console)?,
            GenreCommand::Delete => genre_delete(service, console)?,
            GenreCommand::Exit => return Ok(SessionEnd::ExitCommand),
        }
    }
}

/// Prints the menu until a valid choice is read; `None` when input closes.
fn next_command<C, I, O>(console: &mut Console<I, O>, layout: &str) -> io::Result<Option<C>>
where
    C: MenuCommand,
    I: BufRead,
    O: Write,
{
    loop {
        console.say("")?;
        for line in C::menu_lines() {
            console.say(line)?;
        }
        let Some(choice) = console.prompt(CHOICE_PROMPT)? else {
            return Ok(None);
        };
        match C::parse(&choice) {
            Some(command) => {
                debug!(
                    "event=menu_command module=cli layout={layout} command={}",
                    command.name()
                );
                return Ok(Some(command));
            }
            None => console.say("Invalid choice. Please try again.")?,
        }
    }
}

fn flat_add<R, I, O>(
    service: &FlatCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: FlatBookRepository,
    I: BufRead,
    O: Write,
{
    let Some([title, author, year, genre]) = console.form([
        "Enter the book title: ",
        "Enter the author: ",
        "Enter the publication year: ",
        "Enter the genre: ",
    ])?
    else {
        return console.say(CANCELLED);
    };

    match service.add_book(&Book::new(title, author, year, genre)) {
        Ok(()) => console.say("Book added to the library."),
        Err(err) => report_failure(console, "add", &err),
    }
}

fn flat_search<R, I, O>(
    service: &FlatCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: FlatBookRepository,
    I: BufRead,
    O: Write,
{
    let Some([title]) = console.form(["Enter the title to search for: "])? else {
        return console.say(CANCELLED);
    };

    match service.search_by_title(&title) {
        Ok(books) if books.is_empty() => {
            console.say(format!("No book titled '{title}' was found."))
        }
        Ok(books) => {
            console.say(format!("Books titled '{title}':"))?;
            books
                .iter()
                .try_for_each(|book| console.say(format_book(book)))
        }
        Err(err) => report_failure(console, "search", &err),
    }
}

fn flat_delete<R, I, O>(
    service: &FlatCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: FlatBookRepository,
    I: BufRead,
    O: Write,
{
    let Some([title]) = console.form(["Enter the title to delete: "])? else {
        return console.say(CANCELLED);
    };

    match service.delete_by_title(&title) {
        Ok(outcome) => console.say(format_delete(&title, outcome)),
        Err(err) => report_failure(console, "delete", &err),
    }
}

fn flat_list<R, I, O>(
    service: &FlatCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: FlatBookRepository,
    I: BufRead,
    O: Write,
{
    match service.list_books() {
        Ok(books) if books.is_empty() => console.say("The library is empty."),
        Ok(books) => {
            console.say("Books in the library:")?;
            books
                .iter()
                .try_for_each(|book| console.say(format_book(book)))
        }
        Err(err) => report_failure(console, "list", &err),
    }
}

fn genre_add<R, I, O>(
    service: &mut GenreCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: GenreBookRepository,
    I: BufRead,
    O: Write,
{
    let Some([title, author, description, genre]) = console.form([
        "Enter the book title: ",
        "Enter the author: ",
        "Enter a description (optional): ",
        "Enter the genre: ",
    ])?
    else {
        return console.say(CANCELLED);
    };

    let description = Some(description).filter(|value| !value.trim().is_empty());
    match service.add_book(&NewGenreBook::new(title, author, description, genre)) {
        Ok(_) => console.say("Book added to the library."),
        Err(err) => report_failure(console, "add", &err),
    }
}

fn genre_search<R, I, O>(
    service: &GenreCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: GenreBookRepository,
    I: BufRead,
    O: Write,
{
    let Some([keyword]) = console.form(["Enter a keyword (title or author): "])? else {
        return console.say(CANCELLED);
    };

    match service.search(&keyword) {
        Ok(hits) if hits.is_empty() => console.say("No results."),
        Ok(hits) => print_summaries(console, "Search results:", &hits),
        Err(err) => report_failure(console, "search", &err),
    }
}

fn genre_list<R, I, O>(
    service: &GenreCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: GenreBookRepository,
    I: BufRead,
    O: Write,
{
    match service.list_books() {
        Ok(items) if items.is_empty() => console.say("The library is empty."),
        Ok(items) => print_summaries(console, "Books in the library:", &items),
        Err(err) => report_failure(console, "list", &err),
    }
}

fn genre_list_by_genre<R, I, O>(
    service: &GenreCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: GenreBookRepository,
    I: BufRead,
    O: Write,
{
    match service.genre_names() {
        Ok(names) if !names.is_empty() => {
            console.say(format!("Known genres: {}", names.join(", ")))?;
        }
        Ok(_) => {}
        Err(err) => return report_failure(console, "list_genres", &err),
    }
    let Some([genre]) = console.form(["Enter the genre: "])? else {
        return console.say(CANCELLED);
    };

    match service.list_by_genre(&genre) {
        Ok(items) if items.is_empty() => console.say(format!("No books in genre '{genre}'.")),
        Ok(items) => print_summaries(console, &format!("Books in genre '{genre}':"), &items),
        Err(err) => report_failure(console, "list_by_genre", &err),
    }
}

fn genre_delete<R, I, O>(
    service: &GenreCatalogService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: GenreBookRepository,
    I: BufRead,
    O: Write,
{
    let Some([title]) = console.form(["Enter the title to delete: "])? else {
        return console.say(CANCELLED);
    };

    match service.delete_by_title(&title) {
        Ok(outcome) => console.say(format_delete(&title, outcome)),
        Err(err) => report_failure(console, "delete", &err),
    }
}

fn print_summaries<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    heading: &str,
    items: &[BookSummary],
) -> io::Result<()> {
    console.say(heading)?;
    items.iter().try_for_each(|item| {
        console.say(format!("Title: {}, Author: {}", item.title, item.author))
    })
}

fn format_book(book: &Book) -> String {
    format!(
        "Title: {}, Author: {}, Year: {}, Genre: {}",
        book.title, book.author, book.year, book.genre
    )
}

fn format_delete(title: &str, outcome: DeleteOutcome) -> String {
    match outcome {
        DeleteOutcome::Removed(1) => format!("Removed the book titled '{title}'."),
        DeleteOutcome::Removed(rows) => format!("Removed {rows} books titled '{title}'."),
        DeleteOutcome::NoMatch => format!("No book titled '{title}' to delete."),
    }
}

/// Prints a failed command and logs its kind without user text.
fn report_failure<I, O, E>(
    console: &mut Console<I, O>,
    operation: &str,
    err: &E,
) -> io::Result<()>
where
    I: BufRead,
    O: Write,
    E: Error + 'static,
{
    if is_rejection(err) {
        debug!("event=command_rejected module=cli operation={operation}");
        return console.say(format!("Invalid input: {err}. Please try again."));
    }

    warn!("event=command_failed module=cli status=error operation={operation} error={err}");
    console.say(format!("Operation failed: {err}"))
}

fn is_rejection(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if matches!(err.downcast_ref::<RepoError>(), Some(RepoError::Validation(_))) {
            return true;
        }
        current = err.source();
    }
    false
}
