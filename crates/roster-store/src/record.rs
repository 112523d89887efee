//! The persistence contract shared by all entities, and raw row decoding.
//!
//! A [`RawRow`] holds SQLite values in table column order, `id` first.
//! Decoding a row is where the dynamic "must be a string" and "must be an
//! integer" checks happen: SQLite columns are untyped, so a `NULL` or a
//! number can sit in a text column.

use rusqlite::types::Value;
use rusqlite::Row;

use roster_types::{EntityKind, KeyLookup, ValidationError};

use crate::error::StoreError;
use crate::identity::IdentityMap;
use crate::session::Session;

/// A database row as loaded, `id` first.
pub type RawRow = Vec<Value>;

/// An entity with a backing table and an identity map in [`Session`].
pub trait Record: Sized {
    const KIND: EntityKind;

    /// Data columns in table order, excluding `id`.
    const COLUMNS: &'static [&'static str];

    fn record_id(&self) -> Option<i64>;

    fn assign_id(&mut self, id: Option<i64>);

    /// Values for [`Self::COLUMNS`], in the same order.
    fn to_values(&self) -> Vec<Value>;

    /// Builds a transient entity from the data columns of a row, running
    /// the same validation as the entity constructor.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedRow` for a wrong column count and
    /// `StoreError::Validation` for a value that fails validation.
    fn from_values(values: &[Value], lookup: &dyn KeyLookup) -> Result<Self, StoreError>;

    fn identity_map(session: &Session) -> &IdentityMap<Self>;

    fn identity_map_mut(session: &mut Session) -> &mut IdentityMap<Self>;

    /// Overwrites every data field from `values`, keeping the id.
    ///
    /// All columns are validated before anything is assigned, so a row that
    /// fails leaves the instance as it was.
    ///
    /// # Errors
    ///
    /// Same as [`Record::from_values`].
    fn refresh(&mut self, values: &[Value], lookup: &dyn KeyLookup) -> Result<(), StoreError> {
        let mut fresh = Self::from_values(values, lookup)?;
        fresh.assign_id(self.record_id());
        *self = fresh;
        Ok(())
    }
}

/// A [`Record`] whose table has a `name` column to search by.
pub trait Named: Record {}

pub(crate) fn text_column(value: &Value, label: &str) -> Result<String, ValidationError> {
    match value {
        Value::Text(text) => Ok(text.clone()),
        _ => Err(ValidationError::not_text(label)),
    }
}

pub(crate) fn integer_column(value: &Value, label: &str) -> Result<i64, ValidationError> {
    match value {
        Value::Integer(n) => Ok(*n),
        _ => Err(ValidationError::not_integer(label)),
    }
}

pub(crate) fn wrong_width<T: Record>(found: usize) -> StoreError {
    StoreError::MalformedRow {
        entity: T::KIND,
        reason: format!(
            "expected {} data columns, found {found}",
            T::COLUMNS.len()
        ),
    }
}

/// Splits a row into its id and data columns.
pub(crate) fn split_row<T: Record>(row: &[Value]) -> Result<(i64, &[Value]), StoreError> {
    match row.split_first() {
        Some((Value::Integer(id), values)) => Ok((*id, values)),
        Some((other, _)) => Err(StoreError::MalformedRow {
            entity: T::KIND,
            reason: format!("id column holds {:?}", other.data_type()),
        }),
        None => Err(StoreError::MalformedRow {
            entity: T::KIND,
            reason: "row is empty".to_string(),
        }),
    }
}

/// `id, col1, col2, ...` for a `SELECT`.
pub(crate) fn select_list<T: Record>() -> String {
    std::iter::once("id")
        .chain(T::COLUMNS.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn read_row<T: Record>(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    (0..=T::COLUMNS.len())
        .map(|idx| row.get::<_, Value>(idx))
        .collect()
}
