//! The session: one connection plus one identity map per entity kind.
//!
//! Every persistence operation is generic over [`Record`] and runs a single
//! autocommitted statement. Loads go through [`Session::instance_from_db`],
//! which is the only place rows become entities, so the identity maps stay
//! consistent with what has been read.

use std::cell::{Ref, RefMut};
use std::rc::Rc;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use roster_db::DbRuntimeSettings;
use roster_types::{Department, Employee, EntityKind, KeyLookup, Review};

use crate::error::StoreError;
use crate::identity::{share, IdentityMap, Shared};
use crate::record::{read_row, select_list, split_row, Named, Record};

/// Owns the database connection and the identity maps.
///
/// A session is single-threaded. Entity handles it returns are only
/// meaningful within the session that produced them.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
    pub(crate) departments: IdentityMap<Department>,
    pub(crate) employees: IdentityMap<Employee>,
    pub(crate) reviews: IdentityMap<Review>,
}

impl Session {
    /// Wraps an already opened connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            departments: IdentityMap::default(),
            employees: IdentityMap::default(),
            reviews: IdentityMap::default(),
        }
    }

    /// Opens the database at `path` and starts a session on it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the database cannot be opened.
    pub fn open(path: &str, settings: DbRuntimeSettings) -> Result<Self, StoreError> {
        let conn = roster_db::open_connection(path, settings)?;
        Ok(Self::new(conn))
    }

    /// Starts a session on a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if SQLite cannot allocate it.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:", DbRuntimeSettings::default())
    }

    /// The underlying connection, for ad hoc SQL.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn departments(&self) -> &IdentityMap<Department> {
        &self.departments
    }

    pub fn employees(&self) -> &IdentityMap<Employee> {
        &self.employees
    }

    pub fn reviews(&self) -> &IdentityMap<Review> {
        &self.reviews
    }

    /// The identity map for `T`.
    pub fn identity_map<T: Record>(&self) -> &IdentityMap<T> {
        T::identity_map(self)
    }

    /// Forgets every cached instance. Rows are untouched.
    pub fn clear_identity_maps(&mut self) {
        self.departments.clear();
        self.employees.clear();
        self.reviews.clear();
    }

    // ── Table lifecycle ──────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `StoreError::Schema` if the DDL fails.
    pub fn create_table<T: Record>(&self) -> Result<(), StoreError> {
        roster_db::create_table(&self.conn, T::KIND)?;
        Ok(())
    }

    /// Drops `T`'s table. The identity map is left as is.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Schema` if the DDL fails.
    pub fn drop_table<T: Record>(&self) -> Result<(), StoreError> {
        roster_db::drop_table(&self.conn, T::KIND)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StoreError::Schema` on the first failing table.
    pub fn create_all_tables(&self) -> Result<(), StoreError> {
        roster_db::create_all_tables(&self.conn)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StoreError::Schema` on the first failing table.
    pub fn drop_all_tables(&self) -> Result<(), StoreError> {
        roster_db::drop_all_tables(&self.conn)?;
        Ok(())
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Inserts a transient entity, or updates a persisted one.
    ///
    /// On insert the generated id is assigned to the entity and the handle
    /// is registered in the identity map.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the statement fails.
    pub fn save<T: Record>(&mut self, entity: &Shared<T>) -> Result<(), StoreError> {
        let existing = read(entity)?.record_id();
        if existing.is_some() {
            return self.update(entity);
        }

        let mut record = write(entity)?;
        let values = record.to_values();
        let table = T::KIND.table();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            T::COLUMNS.join(", "),
            placeholders(T::COLUMNS.len())
        );
        self.conn.execute(&sql, params_from_iter(values.iter()))?;

        let id = self.conn.last_insert_rowid();
        record.assign_id(Some(id));
        drop(record);
        T::identity_map_mut(self).insert(id, Rc::clone(entity));
        tracing::debug!(table, id, "inserted row");
        Ok(())
    }

    /// Overwrites every column of the entity's row.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotPersisted` if the entity has no id, or
    /// `StoreError::Database` if the statement fails.
    pub fn update<T: Record>(&self, entity: &Shared<T>) -> Result<(), StoreError> {
        let (id, mut values) = {
            let record = read(entity)?;
            let id = record
                .record_id()
                .ok_or(StoreError::NotPersisted { entity: T::KIND })?;
            (id, record.to_values())
        };

        let table = T::KIND.table();
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, column)| format!("{column} = ?{}", idx + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {table} SET {assignments} WHERE id = ?{}",
            T::COLUMNS.len() + 1
        );
        values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(values.iter()))?;
        tracing::debug!(table, id, changed, "updated row");
        Ok(())
    }

    /// Deletes the entity's row, unregisters it, and clears its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotPersisted` if the entity has no id (including
    /// a second `delete` of the same entity), or `StoreError::Database` if
    /// the statement fails. On a database error the entity keeps its id and
    /// its identity map entry.
    ///
    /// A stale handle (one replaced in the map after
    /// [`Session::clear_identity_maps`]) may be passed: the cached instance
    /// for the same id is unregistered and has its id cleared as well.
    /// Returns `StoreError::Borrowed` before touching the row if either
    /// instance is borrowed.
    pub fn delete<T: Record>(&mut self, entity: &Shared<T>) -> Result<(), StoreError> {
        let mut record = write(entity)?;
        let id = record
            .record_id()
            .ok_or(StoreError::NotPersisted { entity: T::KIND })?;

        let cached = T::identity_map(self)
            .get(id)
            .filter(|cached| !Rc::ptr_eq(cached, entity));
        let mut cached_record = match &cached {
            Some(cached) => Some(write(cached)?),
            None => None,
        };

        let table = T::KIND.table();
        self.conn
            .execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])?;

        record.assign_id(None);
        if let Some(cached_record) = cached_record.as_mut() {
            cached_record.assign_id(None);
        }
        drop(cached_record);
        drop(record);
        T::identity_map_mut(self).remove(id);
        tracing::debug!(table, id, "deleted row");
        Ok(())
    }

    /// Materialises a raw row, reusing the cached instance for its id.
    ///
    /// If the id is already in the identity map the cached instance is
    /// updated in place and returned, so existing handles see the new
    /// values. Otherwise a new instance is built and registered.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedRow` if the row has the wrong shape and
    /// `StoreError::Validation` if a column fails validation. Neither
    /// changes the identity map.
    pub fn instance_from_db<T: Record>(&mut self, row: &[Value]) -> Result<Shared<T>, StoreError> {
        let (id, values) = split_row::<T>(row)?;

        if let Some(cached) = T::identity_map(self).get(id) {
            write(&cached)?.refresh(values, &*self)?;
            return Ok(cached);
        }

        let mut record = T::from_values(values, &*self)?;
        record.assign_id(Some(id));
        let shared = share(record);
        T::identity_map_mut(self).insert(id, Rc::clone(&shared));
        Ok(shared)
    }

    // ── Finders ──────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `StoreError::Database` on SQL failure, or the errors of
    /// [`Session::instance_from_db`] if the row cannot be materialised.
    pub fn find_by_id<T: Record>(&mut self, id: i64) -> Result<Option<Shared<T>>, StoreError> {
        let found = self.select_where::<T>("WHERE id = ?1", &[Value::Integer(id)])?;
        Ok(found.into_iter().next())
    }

    /// First row, by id, whose `name` equals `name` exactly.
    ///
    /// # Errors
    ///
    /// Same as [`Session::find_by_id`].
    pub fn find_by_name<T: Named>(&mut self, name: &str) -> Result<Option<Shared<T>>, StoreError> {
        let found = self.select_where::<T>(
            "WHERE name = ?1 ORDER BY id LIMIT 1",
            &[Value::Text(name.to_string())],
        )?;
        Ok(found.into_iter().next())
    }

    /// Every row of `T`'s table, ordered by id.
    ///
    /// # Errors
    ///
    /// Same as [`Session::find_by_id`].
    pub fn get_all<T: Record>(&mut self) -> Result<Vec<Shared<T>>, StoreError> {
        self.select_where::<T>("ORDER BY id", &[])
    }

    /// Loads every table into the identity maps, parents first, so rows
    /// whose foreign keys point at not-yet-loaded parents can be read.
    ///
    /// # Errors
    ///
    /// Same as [`Session::get_all`].
    pub fn load_all(&mut self) -> Result<(), StoreError> {
        let departments = self.get_all::<Department>()?.len();
        let employees = self.get_all::<Employee>()?.len();
        let reviews = self.get_all::<Review>()?.len();
        tracing::debug!(departments, employees, reviews, "loaded all tables");
        Ok(())
    }

    /// Rows of `T` whose `column` equals `id`, ordered by id.
    pub(crate) fn find_by_foreign_key<T: Record>(
        &mut self,
        column: &str,
        id: i64,
    ) -> Result<Vec<Shared<T>>, StoreError> {
        self.select_where::<T>(
            &format!("WHERE {column} = ?1 ORDER BY id"),
            &[Value::Integer(id)],
        )
    }

    fn select_where<T: Record>(
        &mut self,
        clause: &str,
        params: &[Value],
    ) -> Result<Vec<Shared<T>>, StoreError> {
        let sql = format!("SELECT {} FROM {} {clause}", select_list::<T>(), T::KIND.table());
        let rows = {
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(params.iter()), read_row::<T>)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        rows.iter().map(|row| self.instance_from_db(row)).collect()
    }
}

impl KeyLookup for Session {
    fn contains(&self, kind: EntityKind, id: i64) -> bool {
        match kind {
            EntityKind::Department => self.departments.contains(id),
            EntityKind::Employee => self.employees.contains(id),
            EntityKind::Review => self.reviews.contains(id),
        }
    }
}

pub(crate) fn read<T: Record>(entity: &Shared<T>) -> Result<Ref<'_, T>, StoreError> {
    entity
        .try_borrow()
        .map_err(|_| StoreError::Borrowed { entity: T::KIND })
}

/// The entity's id, or `StoreError::NotPersisted` if it is transient.
pub(crate) fn persisted_id<T: Record>(entity: &Shared<T>) -> Result<i64, StoreError> {
    read(entity)?
        .record_id()
        .ok_or(StoreError::NotPersisted { entity: T::KIND })
}

pub(crate) fn write<T: Record>(entity: &Shared<T>) -> Result<RefMut<'_, T>, StoreError> {
    entity
        .try_borrow_mut()
        .map_err(|_| StoreError::Borrowed { entity: T::KIND })
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ")
}
