//! Department persistence and its employees.

use rusqlite::types::Value;

use roster_types::{Department, Employee, EntityKind, KeyLookup};

use crate::error::StoreError;
use crate::identity::{share, IdentityMap, Shared};
use crate::record::{text_column, wrong_width, Named, Record};
use crate::session::{persisted_id, Session};

impl Record for Department {
    const KIND: EntityKind = EntityKind::Department;
    const COLUMNS: &'static [&'static str] = &["name", "location"];

    fn record_id(&self) -> Option<i64> {
        self.id()
    }

    fn assign_id(&mut self, id: Option<i64>) {
        self.set_id(id);
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name().to_string()),
            Value::Text(self.location().to_string()),
        ]
    }

    fn from_values(values: &[Value], _lookup: &dyn KeyLookup) -> Result<Self, StoreError> {
        let [name, location] = values else {
            return Err(wrong_width::<Self>(values.len()));
        };
        let name = text_column(name, Department::NAME_LABEL)?;
        let location = text_column(location, Department::LOCATION_LABEL)?;
        Ok(Department::new(name, location)?)
    }

    fn identity_map(session: &Session) -> &IdentityMap<Self> {
        &session.departments
    }

    fn identity_map_mut(session: &mut Session) -> &mut IdentityMap<Self> {
        &mut session.departments
    }
}

impl Named for Department {}

impl Session {
    /// Constructs a department and saves it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for blank fields, or the errors of
    /// [`Session::save`].
    pub fn create_department(
        &mut self,
        name: &str,
        location: &str,
    ) -> Result<Shared<Department>, StoreError> {
        let department = share(Department::new(name, location)?);
        self.save(&department)?;
        Ok(department)
    }

    /// Employees whose `department_id` is this department's id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotPersisted` for a transient department.
    pub fn department_employees(
        &mut self,
        department: &Shared<Department>,
    ) -> Result<Vec<Shared<Employee>>, StoreError> {
        let id = persisted_id(department)?;
        self.find_by_foreign_key::<Employee>("department_id", id)
    }
}
