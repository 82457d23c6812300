//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by catalog behavior.
//! - Ensure the requested catalog layout before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections hold every table/column of the requested layout.

use super::schema::{ensure_layout, CatalogLayout};
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) a catalog database file for the given layout.
///
/// # Side effects
/// - Creates the file and the layout tables when absent.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, layout: CatalogLayout) -> DbResult<Connection> {
    open_with("file", layout, || Connection::open(path))
}

/// Opens an in-memory catalog database for the given layout.
pub fn open_db_in_memory(layout: CatalogLayout) -> DbResult<Connection> {
    open_with("memory", layout, Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    layout: CatalogLayout,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode} layout={layout}");

    let conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} layout={layout} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn, layout) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} layout={layout} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} layout={layout} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection, layout: CatalogLayout) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_layout(conn, layout)?;
    Ok(())
}
