#![allow(dead_code)]

use std::collections::HashSet;

use rand::seq::SliceRandom;
use roster_store::{RawRow, Session};
use rusqlite::types::Value;

const FIRST_NAMES: &[&str] = &[
    "Amir", "Bea", "Chen", "Dana", "Emeka", "Farah", "Goran", "Hana", "Ines", "Jonas",
];
const LAST_NAMES: &[&str] = &[
    "Okafor", "Lindqvist", "Moreau", "Tanaka", "Silva", "Novak", "Haddad", "Kowalski", "Reyes",
    "Ibsen",
];

/// In-memory session with no tables.
pub fn session() -> Session {
    Session::open_in_memory().expect("should open in-memory session")
}

/// In-memory session with all three tables created.
pub fn session_with_tables() -> Session {
    let session = session();
    session
        .create_all_tables()
        .expect("should create all tables");
    session
}

pub fn table_exists(session: &Session, table: &str) -> bool {
    session
        .conn()
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [table],
            |row| row.get(0),
        )
        .expect("should query sqlite_master")
}

/// Runs `sql` and returns every row as raw values.
pub fn raw_rows(session: &Session, sql: &str) -> Vec<RawRow> {
    let mut stmt = session.conn().prepare(sql).expect("should prepare query");
    let width = stmt.column_count();
    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|idx| row.get::<_, Value>(idx))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .expect("should run query")
        .map(|row| row.expect("should read row"))
        .collect();
    rows
}

pub fn first_raw_row(session: &Session, sql: &str) -> RawRow {
    raw_rows(session, sql)
        .into_iter()
        .next()
        .expect("query should return a row")
}

/// `count` distinct random full names.
pub fn fake_names(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(count);
    while names.len() < count {
        let first = FIRST_NAMES.choose(&mut rng).expect("names are non-empty");
        let last = LAST_NAMES.choose(&mut rng).expect("names are non-empty");
        let name = format!("{first} {last}");
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}
