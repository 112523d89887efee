use serde::Serialize;

use crate::lookup::{EntityKind, KeyLookup};
use crate::validation::{require_reference, require_text, ValidationError};

const YEAR: &str = "Review year";
const SUMMARY: &str = "Review summary";
const EMPLOYEE_ID: &str = "Employee ID";

/// A yearly performance review of one [`Employee`](crate::Employee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<i64>,
    year: i64,
    summary: String,
    employee_id: i64,
}

impl Review {
    /// Creates a transient review.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `summary` is blank or the employee
    /// is not loaded.
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: i64,
        lookup: &dyn KeyLookup,
    ) -> Result<Self, ValidationError> {
        let summary = summary.into();
        require_text(SUMMARY, &summary)?;
        require_reference(EMPLOYEE_ID, EntityKind::Employee, employee_id, lookup)?;
        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Sets the primary key. Only the persistence layer should call this.
    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn set_year(&mut self, year: i64) {
        self.year = year;
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `summary` is blank.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ValidationError> {
        let summary = summary.into();
        require_text(SUMMARY, &summary)?;
        self.summary = summary;
        Ok(())
    }

    pub fn employee_id(&self) -> i64 {
        self.employee_id
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if no employee with `employee_id` is
    /// loaded.
    pub fn set_employee_id(
        &mut self,
        employee_id: i64,
        lookup: &dyn KeyLookup,
    ) -> Result<(), ValidationError> {
        require_reference(EMPLOYEE_ID, EntityKind::Employee, employee_id, lookup)?;
        self.employee_id = employee_id;
        Ok(())
    }

    pub const YEAR_LABEL: &'static str = YEAR;
    pub const SUMMARY_LABEL: &'static str = SUMMARY;
    pub const EMPLOYEE_ID_LABEL: &'static str = EMPLOYEE_ID;
}

impl std::fmt::Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Review {}: {}, {}, Employee {}>",
            crate::display_id(self.id),
            self.year,
            self.summary,
            self.employee_id
        )
    }
}
