use serde::{Deserialize, Serialize};

use super::ColumnId;

/// Sort direction for one column
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A (column, direction) pair
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SortDescriptor {
    /// Column whose accessor supplies the sort key
    pub column_id: ColumnId,
    pub direction: SortDirection,
}

/// Ordered multi-column sort: earlier descriptors take precedence, later ones
/// break ties.
///
/// A column's sort control sets or replaces its descriptor in place; there is
/// no per-column "unsorted" click state - clearing is an explicit action on
/// the whole state.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub descriptors: Vec<SortDescriptor>,
}

impl SortState {
    /// Set or replace the descriptor for `column_id`.
    ///
    /// A column already in the state keeps its precedence and only changes
    /// direction; a new column is appended with the lowest precedence.
    pub fn set(&mut self, column_id: impl Into<ColumnId>, direction: SortDirection) {
        let column_id = column_id.into();
        if let Some(existing) = self
            .descriptors
            .iter_mut()
            .find(|d| d.column_id == column_id)
        {
            existing.direction = direction;
        } else {
            self.descriptors.push(SortDescriptor {
                column_id,
                direction,
            });
        }
    }

    /// Remove every descriptor
    pub fn clear(&mut self) {
        self.descriptors.clear();
    }

    /// True when no sort is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Current direction for a column, if it is part of the sort
    #[must_use]
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.descriptors
            .iter()
            .find(|d| d.column_id == column_id)
            .map(|d| d.direction)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_direction_in_place() {
        let mut state = SortState::default();
        state.set("name", SortDirection::Ascending);
        state.set("score", SortDirection::Descending);
        state.set("name", SortDirection::Descending);

        assert_eq!(state.descriptors.len(), 2);
        // Precedence preserved: "name" still first
        assert_eq!(state.descriptors.first().unwrap().column_id, "name");
        assert_eq!(
            state.direction_of("name"),
            Some(SortDirection::Descending)
        );
    }

    #[test]
    fn test_clear_empties_whole_state() {
        let mut state = SortState::default();
        state.set("name", SortDirection::Ascending);
        state.clear();
        assert!(state.is_empty());
    }
}
