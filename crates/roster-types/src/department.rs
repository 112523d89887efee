use serde::Serialize;

use crate::validation::{require_text, ValidationError};

const NAME: &str = "Department name";
const LOCATION: &str = "Department location";

/// A department. Top-level entity with no foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    id: Option<i64>,
    name: String,
    location: String,
}

impl Department {
    /// Creates a transient department.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` or `location` is blank.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let location = location.into();
        require_text(NAME, &name)?;
        require_text(LOCATION, &location)?;
        Ok(Self {
            id: None,
            name,
            location,
        })
    }

    /// Primary key, `None` while transient.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Sets the primary key. Only the persistence layer should call this.
    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is blank.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        require_text(NAME, &name)?;
        self.name = name;
        Ok(())
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `location` is blank.
    pub fn set_location(&mut self, location: impl Into<String>) -> Result<(), ValidationError> {
        let location = location.into();
        require_text(LOCATION, &location)?;
        self.location = location;
        Ok(())
    }

    /// Label used when a column holds a non-text value for `name`.
    pub const NAME_LABEL: &'static str = NAME;
    /// Label used when a column holds a non-text value for `location`.
    pub const LOCATION_LABEL: &'static str = LOCATION;
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Department {}: {}, {}>",
            crate::display_id(self.id),
            self.name,
            self.location
        )
    }
}
