//! Table definitions and idempotent table lifecycle.

use roster_types::EntityKind;
use rusqlite::Connection;
use thiserror::Error;

/// `CREATE TABLE` statement for each entity kind.
fn create_sql(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Department => {
            "CREATE TABLE IF NOT EXISTS departments (
                id INTEGER PRIMARY KEY,
                name TEXT,
                location TEXT
            )"
        }
        EntityKind::Employee => {
            "CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY,
                name TEXT,
                job_title TEXT,
                department_id INTEGER,
                FOREIGN KEY (department_id) REFERENCES departments(id)
            )"
        }
        EntityKind::Review => {
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                year INT,
                summary TEXT,
                employee_id INTEGER,
                FOREIGN KEY (employee_id) REFERENCES employees(id)
            )"
        }
    }
}

/// Errors that can occur while creating or dropping tables.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A DDL statement failed.
    #[error("schema change on '{table}' failed: {source}")]
    ExecutionFailed {
        /// The table being created or dropped.
        table: &'static str,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to query `sqlite_master`.
    #[error("failed to check schema state: {0}")]
    StateQuery(rusqlite::Error),
}

/// Creates the table backing `kind` if it does not already exist.
///
/// # Errors
///
/// Returns `SchemaError::ExecutionFailed` if the statement fails.
pub fn create_table(conn: &Connection, kind: EntityKind) -> Result<(), SchemaError> {
    let table = kind.table();
    conn.execute_batch(create_sql(kind))
        .map_err(|source| SchemaError::ExecutionFailed { table, source })?;
    tracing::info!(table, "created table");
    Ok(())
}

/// Drops the table backing `kind` if it exists.
///
/// # Errors
///
/// Returns `SchemaError::ExecutionFailed` if the statement fails.
pub fn drop_table(conn: &Connection, kind: EntityKind) -> Result<(), SchemaError> {
    let table = kind.table();
    conn.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))
        .map_err(|source| SchemaError::ExecutionFailed { table, source })?;
    tracing::info!(table, "dropped table");
    Ok(())
}

/// Creates every table, parents first.
///
/// # Errors
///
/// Stops at and returns the first failure.
pub fn create_all_tables(conn: &Connection) -> Result<(), SchemaError> {
    for kind in EntityKind::ALL {
        create_table(conn, kind)?;
    }
    Ok(())
}

/// Drops every table, children first.
///
/// # Errors
///
/// Stops at and returns the first failure.
pub fn drop_all_tables(conn: &Connection) -> Result<(), SchemaError> {
    for kind in EntityKind::ALL.into_iter().rev() {
        drop_table(conn, kind)?;
    }
    Ok(())
}

/// Returns whether a table named `table` exists.
///
/// # Errors
///
/// Returns `SchemaError::StateQuery` if `sqlite_master` cannot be read.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool, SchemaError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [table],
        |row| row.get(0),
    )
    .map_err(SchemaError::StateQuery)
}
