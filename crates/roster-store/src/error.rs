//! Error types for the persistence layer.

use roster_types::{EntityKind, ValidationError};

/// Errors that can occur during session operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An attribute failed validation, on construction or while loading a row.
    #[error("invalid argument: {0}")]
    Validation(#[from] ValidationError),

    /// A SQL statement failed. Propagated unchanged; nothing is retried.
    #[error("store database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The database could not be opened.
    #[error(transparent)]
    Connection(#[from] roster_db::ConnectionError),

    /// A table could not be created or dropped.
    #[error(transparent)]
    Schema(#[from] roster_db::SchemaError),

    /// The entity has no id, either because it was never saved or because
    /// it has been deleted.
    #[error("{entity} is not persisted")]
    NotPersisted {
        /// Kind of the offending entity.
        entity: EntityKind,
    },

    /// A raw row did not have the shape of its table.
    #[error("malformed {entity} row: {reason}")]
    MalformedRow {
        /// Kind of entity the row was meant for.
        entity: EntityKind,
        /// What was wrong with it.
        reason: String,
    },

    /// The entity handle is mutably borrowed elsewhere.
    #[error("{entity} handle is already borrowed")]
    Borrowed {
        /// Kind of the borrowed entity.
        entity: EntityKind,
    },
}
