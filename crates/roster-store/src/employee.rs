//! Employee persistence, its department, and its reviews.

use rusqlite::types::Value;

use roster_types::{Department, Employee, EntityKind, KeyLookup, Review};

use crate::error::StoreError;
use crate::identity::{share, IdentityMap, Shared};
use crate::record::{integer_column, text_column, wrong_width, Named, Record};
use crate::session::{persisted_id, read, Session};

impl Record for Employee {
    const KIND: EntityKind = EntityKind::Employee;
    const COLUMNS: &'static [&'static str] = &["name", "job_title", "department_id"];

    fn record_id(&self) -> Option<i64> {
        self.id()
    }

    fn assign_id(&mut self, id: Option<i64>) {
        self.set_id(id);
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name().to_string()),
            Value::Text(self.job_title().to_string()),
            Value::Integer(self.department_id()),
        ]
    }

    fn from_values(values: &[Value], lookup: &dyn KeyLookup) -> Result<Self, StoreError> {
        let [name, job_title, department_id] = values else {
            return Err(wrong_width::<Self>(values.len()));
        };
        let name = text_column(name, Employee::NAME_LABEL)?;
        let job_title = text_column(job_title, Employee::JOB_TITLE_LABEL)?;
        let department_id = integer_column(department_id, Employee::DEPARTMENT_ID_LABEL)?;
        Ok(Employee::new(name, job_title, department_id, lookup)?)
    }

    fn identity_map(session: &Session) -> &IdentityMap<Self> {
        &session.employees
    }

    fn identity_map_mut(session: &mut Session) -> &mut IdentityMap<Self> {
        &mut session.employees
    }
}

impl Named for Employee {}

impl Session {
    /// Constructs an employee and saves it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for blank fields or an unknown
    /// department, or the errors of [`Session::save`].
    pub fn create_employee(
        &mut self,
        name: &str,
        job_title: &str,
        department_id: i64,
    ) -> Result<Shared<Employee>, StoreError> {
        let employee = share(Employee::new(name, job_title, department_id, &*self)?);
        self.save(&employee)?;
        Ok(employee)
    }

    /// Reviews whose `employee_id` is this employee's id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotPersisted` for a transient employee.
    pub fn employee_reviews(
        &mut self,
        employee: &Shared<Employee>,
    ) -> Result<Vec<Shared<Review>>, StoreError> {
        let id = persisted_id(employee)?;
        self.find_by_foreign_key::<Review>("employee_id", id)
    }

    /// The department this employee belongs to, if its row still exists.
    ///
    /// # Errors
    ///
    /// Same as [`Session::find_by_id`].
    pub fn employee_department(
        &mut self,
        employee: &Shared<Employee>,
    ) -> Result<Option<Shared<Department>>, StoreError> {
        let department_id = read(employee)?.department_id();
        self.find_by_id::<Department>(department_id)
    }
}
