//! Interactive book catalog.
//!
//! # Responsibility
//! - Parse flags, start logging and open the catalog file.
//! - Run the menu loop for the selected layout and close the catalog once.

mod config;
mod console;
mod error;
mod menu;
mod session;

use bookshelf_core::{
    core_version, init_logging, open_db, CatalogLayout, FlatCatalogService, GenreCatalogService,
    SqliteFlatBookRepository, SqliteGenreBookRepository,
};
use clap::Parser;
use config::Cli;
use console::{Console, Interrupt};
use error::CliError;
use log::{error, info, warn};
use rusqlite::Connection;
use session::SessionEnd;
use std::io;
use std::process::ExitCode;

const INTERRUPTED_EXIT_CODE: i32 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match std::env::current_dir() {
        Ok(cwd) => {
            if let Err(err) = init_logging(cli.log_level(), cli.resolved_log_dir(&cwd)) {
                eprintln!("warning: file logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("warning: file logging disabled: {err}"),
    }
    info!(
        "event=app_start module=cli status=ok core_version={}",
        core_version()
    );

    let interrupt = Interrupt::default();
    let handler_interrupt = interrupt.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        // Outside a record form Ctrl-C keeps its usual meaning.
        if !handler_interrupt.raise() {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }) {
        warn!("event=interrupt_handler module=cli status=error error={err}");
    }

    match run(&cli, interrupt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, interrupt: Interrupt) -> Result<(), CliError> {
    let layout = CatalogLayout::from(cli.layout);
    let mut conn = open_db(&cli.db, layout)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock()).with_interrupt(interrupt);

    let end = run_layout(&mut conn, layout, cli, &mut console)?;
    info!("event=session_end module=cli status=ok layout={layout} reason={end:?}");
    console.say("Exiting.")?;

    conn.close().map_err(|(_, err)| CliError::Close(err))
}

fn run_layout<I: io::BufRead, O: io::Write>(
    conn: &mut Connection,
    layout: CatalogLayout,
    cli: &Cli,
    console: &mut Console<I, O>,
) -> Result<SessionEnd, CliError> {
    let end = match layout {
        CatalogLayout::Flat => {
            let service = FlatCatalogService::new(SqliteFlatBookRepository::try_new(conn)?);
            session::run_flat(&service, console)?
        }
        CatalogLayout::Genre => {
            let repo = SqliteGenreBookRepository::try_new(conn, cli.genre_policy.into())?;
            let mut service = GenreCatalogService::new(repo);
            session::run_genre(&mut service, console)?
        }
    };
    Ok(end)
}
