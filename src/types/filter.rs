use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ColumnId;

/// Active filter inputs: one global text query plus per-column predicates.
///
/// The global text matches case-insensitively against every visible,
/// filterable column (OR across columns); each column filter must match its
/// own column's value (AND across filters).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Global search text; empty means the global match step is skipped
    pub global_text: String,
    /// Per-column substring predicates, keyed by column id
    pub column_filters: HashMap<ColumnId, String>,
}

impl FilterState {
    /// True when no filter input is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global_text.is_empty() && self.column_filters.values().all(String::is_empty)
    }

    /// Set or clear a column filter; an empty value removes the entry
    pub fn set_column_filter(&mut self, column_id: impl Into<ColumnId>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.column_filters.remove(&column_id.into());
        } else {
            self.column_filters.insert(column_id.into(), value);
        }
    }
}
