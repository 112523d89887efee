//! The single "invalid argument" error and the checks that produce it.

use crate::lookup::{EntityKind, KeyLookup};

/// An attribute failed validation.
///
/// Carries a human-readable message naming the field and the constraint
/// that was violated, e.g. `"Job title must be a non-empty string"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates an error with an arbitrary message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The value supplied for a text field was not text.
    pub fn not_text(label: &str) -> Self {
        Self::new(format!("{label} must be a string"))
    }

    /// The value supplied for a text field was empty or whitespace-only.
    pub fn blank(label: &str) -> Self {
        Self::new(format!("{label} must be a non-empty string"))
    }

    /// The value supplied for an integer field was not an integer.
    pub fn not_integer(label: &str) -> Self {
        Self::new(format!("{label} must be an integer"))
    }

    /// A foreign key pointed at an id that is not in the parent's identity map.
    pub fn dangling(label: &str, target: EntityKind) -> Self {
        Self::new(format!(
            "{label} must reference an existing {}",
            target.label()
        ))
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Checks that `value` is non-empty after trimming whitespace.
///
/// # Errors
///
/// Returns [`ValidationError::blank`] for an empty or whitespace-only value.
pub fn require_text(label: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::blank(label));
    }
    Ok(())
}

/// Checks that `id` is a key of `target`'s identity map.
///
/// # Errors
///
/// Returns [`ValidationError::dangling`] if the lookup does not know the id.
pub fn require_reference(
    label: &str,
    target: EntityKind,
    id: i64,
    lookup: &dyn KeyLookup,
) -> Result<(), ValidationError> {
    if !lookup.contains(target, id) {
        return Err(ValidationError::dangling(label, target));
    }
    Ok(())
}
