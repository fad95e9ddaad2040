//! Durable per-table column visibility.
//!
//! The store reads and writes through an injected key-value interface keyed
//! by table id, so hosts can back it with browser storage, a file, or any
//! durable map. Defaults come from each column's declared `visible` flag on
//! first load; every toggle is persisted immediately (write-through) and
//! persisted entries are never implicitly deleted.

use std::collections::HashMap;

use crate::error::Result;
use crate::types::ColumnId;

/// Key-value persistence seam.
///
/// The concrete medium is external; only string round-tripping is required.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage for tests and non-persistent embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Per-table visibility map persisted through [`KeyValueStorage`].
pub struct ColumnVisibilityStore {
    storage: Box<dyn KeyValueStorage>,
    table_id: String,
    state: HashMap<ColumnId, bool>,
}

impl ColumnVisibilityStore {
    /// Load the persisted map for `table_id`, seeding missing entries from
    /// the declared defaults.
    ///
    /// A missing or unreadable persisted entry degrades to the defaults;
    /// persisted entries for columns no longer declared are kept.
    pub fn load(
        storage: Box<dyn KeyValueStorage>,
        table_id: impl Into<String>,
        defaults: impl IntoIterator<Item = (ColumnId, bool)>,
    ) -> Self {
        let table_id = table_id.into();
        let mut state: HashMap<ColumnId, bool> = defaults.into_iter().collect();
        if let Some(raw) = storage.get(&table_id) {
            if let Ok(persisted) = serde_json::from_str::<HashMap<ColumnId, bool>>(&raw) {
                state.extend(persisted);
            }
        }
        Self {
            storage,
            table_id,
            state,
        }
    }

    /// Whether a column is currently shown; unknown ids default to visible.
    #[must_use]
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.state.get(column_id).copied().unwrap_or(true)
    }

    /// Flip one column and persist immediately; returns the new visibility.
    pub fn toggle(&mut self, column_id: impl Into<ColumnId>) -> Result<bool> {
        let column_id = column_id.into();
        let shown = !self.is_visible(&column_id);
        self.state.insert(column_id, shown);
        self.save()?;
        Ok(shown)
    }

    /// Write the current map through to storage.
    pub fn save(&mut self) -> Result<()> {
        let encoded = serde_json::to_string(&self.state)?;
        self.storage.set(&self.table_id, &encoded)
    }

    /// The current visibility map
    #[must_use]
    pub fn state(&self) -> &HashMap<ColumnId, bool> {
        &self.state
    }
}

impl std::fmt::Debug for ColumnVisibilityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnVisibilityStore")
            .field("table_id", &self.table_id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
