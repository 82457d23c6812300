//! Command-line configuration.

use bookshelf_core::{default_log_level, CatalogLayout, GenrePolicy};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

const DEFAULT_DB_PATH: &str = "library.db";
const DEFAULT_LOG_DIR: &str = "logs";

/// CLI-side layout enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Single `books` table validated against an allow-list.
    Flat,
    /// `books` + `genres` tables with genre filtering.
    Genre,
}

impl From<LayoutArg> for CatalogLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Flat => Self::Flat,
            LayoutArg::Genre => Self::Genre,
        }
    }
}

/// CLI-side genre policy enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenrePolicyArg {
    /// Reuse an existing genre row with the same name.
    Reuse,
    /// Create a new genre row for every added book.
    AlwaysInsert,
}

impl From<GenrePolicyArg> for GenrePolicy {
    fn from(value: GenrePolicyArg) -> Self {
        match value {
            GenrePolicyArg::Reuse => Self::ReuseByName,
            GenrePolicyArg::AlwaysInsert => Self::AlwaysInsert,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(about = "Manage a personal book catalog stored in SQLite", version)]
pub struct Cli {
    /// Catalog database file; created on first run.
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Table layout of the catalog file.
    #[arg(long, value_enum, default_value_t = LayoutArg::Flat)]
    pub layout: LayoutArg,

    /// How adding a book resolves its genre (genre layout only).
    #[arg(long, value_enum, default_value_t = GenrePolicyArg::Reuse)]
    pub genre_policy: GenrePolicyArg,

    /// trace|debug|info|warn|error. Defaults to debug in debug builds.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory for rolling log files. Relative paths resolve against the
    /// current directory.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Absolute log directory, resolved against `cwd`.
    pub fn resolved_log_dir(&self, cwd: &Path) -> PathBuf {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        if dir.is_absolute() {
            dir
        } else {
            cwd.join(dir)
        }
    }
}
