//! Review persistence.

use rusqlite::types::Value;

use roster_types::{Employee, EntityKind, KeyLookup, Review};

use crate::error::StoreError;
use crate::identity::{share, IdentityMap, Shared};
use crate::record::{integer_column, text_column, wrong_width, Record};
use crate::session::{read, Session};

impl Record for Review {
    const KIND: EntityKind = EntityKind::Review;
    const COLUMNS: &'static [&'static str] = &["year", "summary", "employee_id"];

    fn record_id(&self) -> Option<i64> {
        self.id()
    }

    fn assign_id(&mut self, id: Option<i64>) {
        self.set_id(id);
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.year()),
            Value::Text(self.summary().to_string()),
            Value::Integer(self.employee_id()),
        ]
    }

    fn from_values(values: &[Value], lookup: &dyn KeyLookup) -> Result<Self, StoreError> {
        let [year, summary, employee_id] = values else {
            return Err(wrong_width::<Self>(values.len()));
        };
        let year = integer_column(year, Review::YEAR_LABEL)?;
        let summary = text_column(summary, Review::SUMMARY_LABEL)?;
        let employee_id = integer_column(employee_id, Review::EMPLOYEE_ID_LABEL)?;
        Ok(Review::new(year, summary, employee_id, lookup)?)
    }

    fn identity_map(session: &Session) -> &IdentityMap<Self> {
        &session.reviews
    }

    fn identity_map_mut(session: &mut Session) -> &mut IdentityMap<Self> {
        &mut session.reviews
    }
}

impl Session {
    /// Constructs a review and saves it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank summary or an unknown
    /// employee, or the errors of [`Session::save`].
    pub fn create_review(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: i64,
    ) -> Result<Shared<Review>, StoreError> {
        let review = share(Review::new(year, summary, employee_id, &*self)?);
        self.save(&review)?;
        Ok(review)
    }

    /// The employee this review is about, if its row still exists.
    ///
    /// # Errors
    ///
    /// Same as [`Session::find_by_id`].
    pub fn review_employee(
        &mut self,
        review: &Shared<Review>,
    ) -> Result<Option<Shared<Employee>>, StoreError> {
        let employee_id = read(review)?.employee_id();
        self.find_by_id::<Employee>(employee_id)
    }
}
