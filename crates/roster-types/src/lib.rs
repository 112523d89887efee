//! Entity types and attribute validation for the Roster ORM.
//!
//! This crate holds the three persisted entities, [`Department`],
//! [`Employee`], and [`Review`], together with the validation rules every
//! settable field runs through. It has no knowledge of SQL or of where
//! entities are stored: foreign-key existence is checked through the
//! [`KeyLookup`] interface, which the session in `roster-store` implements
//! on top of its identity maps.
//!
//! Every constructor and setter returns `Result<_, ValidationError>`. A
//! setter that fails leaves the previous value untouched.

mod department;
mod employee;
mod lookup;
mod review;
mod validation;

pub use department::Department;
pub use employee::Employee;
pub use lookup::{EntityKind, KeyLookup};
pub use review::Review;
pub use validation::{require_reference, require_text, ValidationError};

/// Renders an optional id the way entity `Display` impls show it.
pub(crate) fn display_id(id: Option<i64>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "None".to_string(),
    }
}
