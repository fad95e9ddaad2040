//! Stable multi-column sorting.
//!
//! A single comparator walks the sort descriptors in precedence order and
//! falls through on ties; rows equal under every descriptor keep their
//! original relative order (the sort is stable, which tests rely on).
//! Missing accessor values sort after all present values in both directions,
//! and descriptors naming an unknown column id are ignored.

use std::cmp::Ordering;

use crate::types::{CellValue, Column, SortDirection, SortState};

/// Compare two optional sort keys under one descriptor's direction.
///
/// Direction applies only to present-present pairs; missing values go last
/// regardless of direction.
fn compare_keys(
    a: Option<&CellValue>,
    b: Option<&CellValue>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.compare(b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Sort `indices` (positions into `rows`) by `state`, returning a new
/// ordering; the input slice order is the stability baseline.
///
/// Sort keys are extracted once per row per descriptor before the sort, so
/// accessors run O(n) times rather than O(n log n).
pub fn apply<R>(
    rows: &[R],
    columns: &[Column<R>],
    indices: &[usize],
    state: &SortState,
) -> Vec<usize> {
    let mut ordered: Vec<usize> = indices.to_vec();
    if state.is_empty() || ordered.len() < 2 {
        return ordered;
    }

    // Resolve descriptors to columns up front; unknown ids drop out here.
    let active: Vec<(&Column<R>, SortDirection)> = state
        .descriptors
        .iter()
        .filter_map(|d| {
            columns
                .iter()
                .find(|c| c.id == d.column_id)
                .map(|c| (c, d.direction))
        })
        .collect();
    if active.is_empty() {
        return ordered;
    }

    // One key column per descriptor, indexed by row position.
    let keys: Vec<Vec<Option<CellValue>>> = active
        .iter()
        .map(|(column, _)| rows.iter().map(|row| column.value(row)).collect())
        .collect();

    ordered.sort_by(|&a, &b| {
        for ((_, direction), column_keys) in active.iter().zip(&keys) {
            let ka = column_keys.get(a).and_then(Option::as_ref);
            let kb = column_keys.get(b).and_then(Option::as_ref);
            let ordering = compare_keys(ka, kb, *direction);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        // All descriptors tie: stable sort preserves input order
        Ordering::Equal
    });

    ordered
}
