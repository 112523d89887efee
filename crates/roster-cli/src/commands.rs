//! The `roster` subcommands.
//!
//! Each command takes an open session and returns what should be printed.
//! Listing commands call [`Session::load_all`] first so that foreign keys
//! resolve against a fully populated identity map.

use roster_store::{Department, Employee, EntityKind, Review, Session, StoreError};
use serde_json::{json, Value};
use thiserror::Error;

/// Errors a command can report.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to render output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i64 },
}

/// Which table `list` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListTarget {
    Departments,
    Employees,
    Reviews,
}

/// Counts of rows inserted by [`seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub departments: usize,
    pub employees: usize,
    pub reviews: usize,
}

/// Creates every table that does not exist yet.
///
/// # Errors
///
/// Returns `CommandError::Store` if a table cannot be created.
pub fn init(session: &Session) -> Result<(), CommandError> {
    session.create_all_tables()?;
    Ok(())
}

/// Drops every table and forgets all cached instances.
///
/// # Errors
///
/// Returns `CommandError::Store` if a table cannot be dropped.
pub fn reset(session: &mut Session) -> Result<(), CommandError> {
    session.drop_all_tables()?;
    session.clear_identity_maps();
    Ok(())
}

/// Recreates the tables and fills them with a small demo data set.
///
/// # Errors
///
/// Returns `CommandError::Store` on the first failing statement.
pub fn seed(session: &mut Session) -> Result<SeedSummary, CommandError> {
    reset(session)?;
    init(session)?;

    let mut summary = SeedSummary::default();

    let departments = [
        ("Payroll", "Building A, 5th Floor"),
        ("Human Resources", "Building C, East Wing"),
    ];
    let mut department_ids = Vec::with_capacity(departments.len());
    for (name, location) in departments {
        let department = session.create_department(name, location)?;
        department_ids.push(persisted(department.borrow().id(), EntityKind::Department)?);
        summary.departments += 1;
    }

    let employees = [
        ("Amir", "Accountant", 0),
        ("Bola", "Manager", 0),
        ("Charlie", "Manager", 1),
        ("Dani", "Benefits Coordinator", 1),
        ("Hao", "New Hires Coordinator", 1),
    ];
    let mut employee_ids = Vec::with_capacity(employees.len());
    for (name, job_title, department) in employees {
        let employee = session.create_employee(name, job_title, department_ids[department])?;
        employee_ids.push(persisted(employee.borrow().id(), EntityKind::Employee)?);
        summary.employees += 1;
    }

    let reviews = [
        (2023, "Efficient worker", 0),
        (2022, "Good work ethic", 1),
        (2023, "Excellent communication skills", 1),
        (2024, "Strong onboarding of new staff", 4),
    ];
    for (year, summary_text, employee) in reviews {
        session.create_review(year, summary_text, employee_ids[employee])?;
        summary.reviews += 1;
    }

    tracing::info!(
        departments = summary.departments,
        employees = summary.employees,
        reviews = summary.reviews,
        "seeded demo data"
    );
    Ok(summary)
}

/// Every row of one table, as a JSON array.
///
/// # Errors
///
/// Returns `CommandError::Store` if the tables cannot be read.
pub fn list(session: &mut Session, target: ListTarget) -> Result<Value, CommandError> {
    session.load_all()?;
    let rows = match target {
        ListTarget::Departments => to_json_array(&session.get_all::<Department>()?)?,
        ListTarget::Employees => to_json_array(&session.get_all::<Employee>()?)?,
        ListTarget::Reviews => to_json_array(&session.get_all::<Review>()?)?,
    };
    Ok(rows)
}

/// One department with its employees.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if no department has `id`.
pub fn show_department(session: &mut Session, id: i64) -> Result<Value, CommandError> {
    session.load_all()?;
    let department = session
        .find_by_id::<Department>(id)?
        .ok_or(CommandError::NotFound {
            entity: EntityKind::Department,
            id,
        })?;
    let employees = session.department_employees(&department)?;

    let mut rendered = serde_json::to_value(&*department.borrow())?;
    rendered["employees"] = to_json_array(&employees)?;
    Ok(rendered)
}

fn to_json_array<T: serde::Serialize>(
    entities: &[roster_store::Shared<T>],
) -> Result<Value, serde_json::Error> {
    let values = entities
        .iter()
        .map(|entity| serde_json::to_value(&*entity.borrow()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(json!(values))
}

fn persisted(id: Option<i64>, entity: EntityKind) -> Result<i64, CommandError> {
    id.ok_or(CommandError::Store(StoreError::NotPersisted { entity }))
}
