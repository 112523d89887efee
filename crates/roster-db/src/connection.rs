//! Connection creation and configuration.

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

/// Runtime tunables for the SQLite connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Whether SQLite itself enforces `FOREIGN KEY` constraints.
    ///
    /// Off by default: references are checked against the identity maps
    /// when a foreign key is assigned.
    pub foreign_keys: bool,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            foreign_keys: false,
        }
    }
}

/// Errors that can occur when opening the database.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// SQLite refused to open the file or apply a pragma.
    #[error("failed to open database: {0}")]
    Open(#[from] rusqlite::Error),

    /// The journal mode could not be switched to WAL.
    #[error("failed to set WAL journal mode, got: {0}")]
    JournalMode(String),
}

/// Opens a SQLite database with WAL mode and the configured pragmas.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file. Use `:memory:` for an
///   in-memory database (useful for testing).
///
/// # Errors
///
/// Returns `ConnectionError` if the database cannot be opened or configured.
pub fn open_connection(
    db_path: &str,
    settings: DbRuntimeSettings,
) -> Result<Connection, ConnectionError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    let conn = Connection::open_with_flags(db_path, flags)?;

    // In-memory databases report "memory", which is expected.
    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    if journal_mode != "wal" && journal_mode != "memory" {
        return Err(ConnectionError::JournalMode(journal_mode));
    }

    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = {};
         PRAGMA busy_timeout = {};",
        if settings.foreign_keys { "ON" } else { "OFF" },
        settings.busy_timeout_ms
    ))?;

    tracing::debug!(
        path = db_path,
        journal_mode = journal_mode.as_str(),
        foreign_keys = settings.foreign_keys,
        "opened database connection"
    );

    Ok(conn)
}
