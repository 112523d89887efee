//! Referential-integrity lookup shared by all entities.

/// The three persisted entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Department,
    Employee,
    Review,
}

impl EntityKind {
    /// All kinds, parents before children.
    pub const ALL: [EntityKind; 3] = [Self::Department, Self::Employee, Self::Review];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Department => "departments",
            Self::Employee => "employees",
            Self::Review => "reviews",
        }
    }

    /// Name used in messages, e.g. "Department".
    pub fn label(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::Employee => "Employee",
            Self::Review => "Review",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Answers whether an entity with a given id is currently loaded.
///
/// Foreign-key setters call this at assignment time. The store's session
/// implements it over its identity maps; tests can pass a closure.
pub trait KeyLookup {
    /// Returns `true` if an entity of `kind` with `id` is known.
    fn contains(&self, kind: EntityKind, id: i64) -> bool;
}

impl<F> KeyLookup for F
where
    F: Fn(EntityKind, i64) -> bool,
{
    fn contains(&self, kind: EntityKind, id: i64) -> bool {
        self(kind, id)
    }
}
