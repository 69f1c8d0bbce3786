//! Named tables: layers and block definitions

use crate::error::{Result, SemanticError};
use crate::types::Handle;
use indexmap::IndexMap;

pub mod block_record;
pub mod layer;

pub use block_record::BlockRecord;
pub use layer::Layer;

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's handle
    fn handle(&self) -> &Handle;

    /// Get the entry's name
    fn name(&self) -> &str;
}

/// Generic table for storing named entries
///
/// Lookup is case-insensitive; iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    /// Entries stored by uppercased name
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry to the table
    pub fn add(&mut self, entry: T) -> Result<()> {
        let name = entry.name().to_uppercase();
        if self.entries.contains_key(&name) {
            return Err(SemanticError::InvalidInput(format!(
                "Entry '{}' already exists in table",
                entry.name()
            )));
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Get all entry names, as written
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
