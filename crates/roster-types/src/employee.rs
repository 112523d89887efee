use serde::Serialize;

use crate::lookup::{EntityKind, KeyLookup};
use crate::validation::{require_reference, require_text, ValidationError};

const NAME: &str = "Employee name";
const JOB_TITLE: &str = "Job title";
const DEPARTMENT_ID: &str = "Department ID";

/// An employee, belonging to one [`Department`](crate::Department).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: Option<i64>,
    name: String,
    job_title: String,
    department_id: i64,
}

impl Employee {
    /// Creates a transient employee.
    ///
    /// `department_id` must be present in the department identity map that
    /// `lookup` consults.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a text field is blank or the
    /// department is unknown.
    pub fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
        lookup: &dyn KeyLookup,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let job_title = job_title.into();
        require_text(NAME, &name)?;
        require_text(JOB_TITLE, &job_title)?;
        require_reference(DEPARTMENT_ID, EntityKind::Department, department_id, lookup)?;
        Ok(Self {
            id: None,
            name,
            job_title,
            department_id,
        })
    }

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

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `job_title` is blank.
    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<(), ValidationError> {
        let job_title = job_title.into();
        require_text(JOB_TITLE, &job_title)?;
        self.job_title = job_title;
        Ok(())
    }

    pub fn department_id(&self) -> i64 {
        self.department_id
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if no department with `department_id`
    /// is loaded.
    pub fn set_department_id(
        &mut self,
        department_id: i64,
        lookup: &dyn KeyLookup,
    ) -> Result<(), ValidationError> {
        require_reference(DEPARTMENT_ID, EntityKind::Department, department_id, lookup)?;
        self.department_id = department_id;
        Ok(())
    }

    pub const NAME_LABEL: &'static str = NAME;
    pub const JOB_TITLE_LABEL: &'static str = JOB_TITLE;
    pub const DEPARTMENT_ID_LABEL: &'static str = DEPARTMENT_ID;
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Employee {}: {}, {}, Dept {}>",
            crate::display_id(self.id),
            self.name,
            self.job_title,
            self.department_id
        )
    }
}
