//! Row selection keyed by stable row ids.
//!
//! Selection survives filter, sort, and page changes: a selected row stays
//! selected while it is scrolled out of the page or filtered out, until an
//! explicit clear or the row disappears from the source data. The select-all
//! control is tri-state over a caller-supplied id scope (typically the
//! current page, or the whole filtered set).

use std::collections::HashSet;

use crate::types::RowId;

/// Tri-state summary for the select-all checkbox over one id scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Every id in the scope is selected (false for an empty scope)
    pub checked: bool,
    /// At least one but not all ids in the scope are selected
    pub indeterminate: bool,
}

/// Set of selected row ids.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<RowId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row's selection; returns the new state.
    pub fn toggle(&mut self, row_id: impl Into<RowId>) -> bool {
        let row_id = row_id.into();
        if self.selected.remove(&row_id) {
            false
        } else {
            self.selected.insert(row_id);
            true
        }
    }

    /// Select or deselect exactly the ids in `page_row_ids`.
    ///
    /// If every id in the scope is already selected, all of them are
    /// deselected; otherwise all of them are selected. Ids outside the scope
    /// are never touched.
    pub fn toggle_all_on_page(&mut self, page_row_ids: &[RowId]) {
        let all_selected = !page_row_ids.is_empty()
            && page_row_ids.iter().all(|id| self.selected.contains(id));
        if all_selected {
            for id in page_row_ids {
                self.selected.remove(id);
            }
        } else {
            for id in page_row_ids {
                self.selected.insert(id.clone());
            }
        }
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selected.contains(row_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// The selected id set
    #[must_use]
    pub fn ids(&self) -> &HashSet<RowId> {
        &self.selected
    }

    /// Drop selections for rows no longer present in the source data.
    ///
    /// Returns true if anything was removed.
    pub fn retain_live(&mut self, live_ids: &HashSet<RowId>) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| live_ids.contains(id));
        self.selected.len() != before
    }

    /// Tri-state select-all summary over `page_row_ids`.
    #[must_use]
    pub fn summary(&self, page_row_ids: &[RowId]) -> SelectionSummary {
        let selected_count = page_row_ids
            .iter()
            .filter(|id| self.selected.contains(*id))
            .count();
        let checked = !page_row_ids.is_empty() && selected_count == page_row_ids.len();
        SelectionSummary {
            checked,
            indeterminate: selected_count > 0 && !checked,
        }
    }
}
