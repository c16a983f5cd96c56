//! In-memory password database model.
//!
//! This module provides:
//! - `EntryKind` and per-kind field schemas (`kind`)
//! - `Entry`, a node in the password tree
//! - `Database`, the ordered forest of top-level entries
//!
//! The model is a pure value type: no I/O, structural equality, and
//! every mutation either fully applies or leaves the tree untouched.
//! Child order is significant and preserved exactly across a
//! load → save cycle.

pub mod kind;

pub use kind::EntryKind;

use chrono::Utc;

use crate::errors::{Result, StorePassError};

/// One named field on an entry, e.g. `generic-password`.
///
/// Fields are kept as an ordered list rather than a map so that ids
/// unknown to this implementation re-serialize in their original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: String,
    pub value: String,
}

/// One node in the password tree.
///
/// Any entry may contain children; the format does not restrict
/// containment to folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Human-readable name, unique among siblings.
    pub name: String,
    pub description: Option<String>,
    /// Last update time as whole seconds since the Unix epoch, UTC.
    pub updated: Option<i64>,
    pub notes: Option<String>,
    pub kind: EntryKind,
    fields: Vec<Field>,
    children: Vec<Entry>,
}

impl Entry {
    /// Create an entry with no properties, fields, or children.
    pub fn new(kind: EntryKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            updated: None,
            notes: None,
            kind,
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------

    /// Get a field value by id.  An empty string is a present value,
    /// distinct from `None`.
    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.value.as_str())
    }

    /// Fields in stored order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Set a field value, validating the id against the entry's kind.
    ///
    /// An id outside the kind's schema is rejected with `InvalidField`,
    /// unless the field is already present on this entry, so a field
    /// loaded opaquely from a newer producer stays writable.
    pub fn set_field(&mut self, id: &str, value: impl Into<String>) -> Result<()> {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.id == id) {
            existing.value = value.into();
            return Ok(());
        }
        if !self.kind.accepts_field(id) {
            return Err(StorePassError::InvalidField {
                field: id.to_string(),
                kind: self.kind.type_attr().to_string(),
            });
        }
        self.fields.push(Field {
            id: id.to_string(),
            value: value.into(),
        });
        Ok(())
    }

    /// Set a field without kind validation.  Used by the markup reader,
    /// which must preserve ids it does not recognize.
    pub(crate) fn set_field_unchecked(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        if let Some(existing) = self.fields.iter_mut().find(|f| f.id == id) {
            existing.value = value.into();
        } else {
            self.fields.push(Field {
                id,
                value: value.into(),
            });
        }
    }

    /// Remove a field, returning its previous value if it was present.
    pub fn remove_field(&mut self, id: &str) -> Option<String> {
        let index = self.fields.iter().position(|f| f.id == id)?;
        Some(self.fields.remove(index).value)
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Children in stored order.
    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.children
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Entry> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Record the current time as the entry's last update.
    pub fn touch(&mut self) {
        self.updated = Some(Utc::now().timestamp());
    }
}

/// The root of a password database: an ordered forest of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    entries: Vec<Entry>,
}

impl Database {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level entries in stored order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.entries
    }

    /// Look up an entry by its name path from the root.
    ///
    /// An empty path addresses the root itself and returns `None`; the
    /// root is not an entry.
    pub fn entry(&self, path: &[&str]) -> Option<&Entry> {
        let (first, rest) = path.split_first()?;
        let mut current = self.entries.iter().find(|e| e.name == *first)?;
        for element in rest {
            current = current.child(element)?;
        }
        Some(current)
    }

    /// Mutable variant of `entry`.
    pub fn entry_mut(&mut self, path: &[&str]) -> Option<&mut Entry> {
        let (first, rest) = path.split_first()?;
        let mut current = self.entries.iter_mut().find(|e| e.name == *first)?;
        for element in rest {
            current = current
                .children
                .iter_mut()
                .find(|c| c.name == *element)?;
        }
        Some(current)
    }

    /// The child list of the container addressed by `path`.  An empty
    /// path addresses the root list.
    fn children_at_mut(&mut self, path: &[&str]) -> Option<&mut Vec<Entry>> {
        if path.is_empty() {
            return Some(&mut self.entries);
        }
        self.entry_mut(path).map(|e| &mut e.children)
    }

    /// Insert `entry` under the container at `parent`, at `position`
    /// (or appended when `position` is `None` or past the end).
    ///
    /// Fails with `EntryNotFound` if the parent does not exist and with
    /// `EntryExists` if a sibling already has the entry's name.  The tree
    /// is unchanged on failure.
    pub fn insert(&mut self, parent: &[&str], entry: Entry, position: Option<usize>) -> Result<()> {
        let siblings = self
            .children_at_mut(parent)
            .ok_or_else(|| StorePassError::EntryNotFound(join_path(parent)))?;
        if siblings.iter().any(|e| e.name == entry.name) {
            let mut path: Vec<&str> = parent.to_vec();
            path.push(&entry.name);
            return Err(StorePassError::EntryExists(join_path(&path)));
        }
        let index = position.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(index, entry);
        Ok(())
    }

    /// Remove the entry at `path` and return it, children included.
    pub fn remove(&mut self, path: &[&str]) -> Result<Entry> {
        let (name, parent) = path
            .split_last()
            .ok_or_else(|| StorePassError::EntryNotFound(String::new()))?;
        let siblings = self
            .children_at_mut(parent)
            .ok_or_else(|| StorePassError::EntryNotFound(join_path(path)))?;
        let index = siblings
            .iter()
            .position(|e| e.name == *name)
            .ok_or_else(|| StorePassError::EntryNotFound(join_path(path)))?;
        Ok(siblings.remove(index))
    }

    /// Move the entry at `path` under `new_parent`, at `position` (or
    /// appended).  Covers both reordering within a parent and
    /// reparenting.  Moving an entry into its own subtree is rejected.
    pub fn move_entry(
        &mut self,
        path: &[&str],
        new_parent: &[&str],
        position: Option<usize>,
    ) -> Result<()> {
        if self.entry(path).is_none() {
            return Err(StorePassError::EntryNotFound(join_path(path)));
        }
        if new_parent.len() >= path.len() && new_parent[..path.len()] == *path {
            return Err(StorePassError::Command(format!(
                "cannot move '{}' into its own subtree",
                join_path(path)
            )));
        }
        // Validate the destination before detaching so a failure cannot
        // drop the entry.
        if !new_parent.is_empty() && self.entry(new_parent).is_none() {
            return Err(StorePassError::EntryNotFound(join_path(new_parent)));
        }
        let moving_within = path.split_last().map(|(_, p)| p) == Some(new_parent);
        if !moving_within {
            let name = path.last().expect("path checked non-empty above");
            let mut dest = new_parent.to_vec();
            dest.push(name);
            if self.entry(&dest).is_some() {
                return Err(StorePassError::EntryExists(join_path(&dest)));
            }
        }
        let entry = self.remove(path)?;
        self.insert(new_parent, entry, position)
    }
}

/// Join path elements for error messages, escaping separator characters
/// the same way the CLI expects them on input.
pub fn join_path(path: &[&str]) -> String {
    path.iter()
        .map(|e| e.replace('\\', "\\\\").replace('/', "\\/"))
        .collect::<Vec<_>>()
        .join("/")
}
