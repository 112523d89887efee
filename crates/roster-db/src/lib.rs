//! Database layer for Roster.
//!
//! Opens the single SQLite connection every session runs on and owns the
//! table definitions for `departments`, `employees`, and `reviews`.
//!
//! There are no versioned migrations. Each table is created with
//! `CREATE TABLE IF NOT EXISTS` and dropped with `DROP TABLE IF EXISTS`,
//! so both operations can be repeated safely. Statements run in autocommit
//! mode; nothing here opens a transaction.

mod connection;
mod schema;

pub use connection::{open_connection, ConnectionError, DbRuntimeSettings};
pub use schema::{
    create_all_tables, create_table, drop_all_tables, drop_table, table_exists, SchemaError,
};
