//! Persistence layer for Roster: sessions, identity maps, and CRUD.
//!
//! A [`Session`] owns the SQLite connection and one [`IdentityMap`] per
//! entity kind. All operations go through it:
//!
//! ```rust,ignore
//! use roster_store::{Department, Employee, Session};
//!
//! let mut session = Session::open_in_memory()?;
//! session.create_all_tables()?;
//!
//! let payroll = session.create_department("Payroll", "Building A")?;
//! let payroll_id = payroll.borrow().id().unwrap();
//! session.create_employee("Sasha", "Manager", payroll_id)?;
//!
//! let sasha = session.find_by_name::<Employee>("Sasha")?.unwrap();
//! assert_eq!(sasha.borrow().department_id(), payroll_id);
//! ```
//!
//! # Identity
//!
//! Each persisted id has at most one live instance per session. Loading a
//! row whose id is already cached updates the cached instance in place and
//! returns the same [`Shared`] handle, so callers holding that handle see
//! the fresh values.
//!
//! # Foreign keys
//!
//! `Employee::department_id` and `Review::employee_id` are checked against
//! the session's identity maps (via [`KeyLookup`]) whenever they are set,
//! including while loading rows. Load parents before children, or call
//! [`Session::load_all`].

mod department;
mod employee;
mod error;
mod identity;
mod record;
mod review;
mod session;

pub use error::StoreError;
pub use identity::{share, IdentityMap, Shared};
pub use record::{Named, RawRow, Record};
pub use session::Session;

pub use roster_db::DbRuntimeSettings;
pub use roster_types::{Department, Employee, EntityKind, KeyLookup, Review, ValidationError};
