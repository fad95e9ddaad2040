//! Sorting tests: multi-column precedence, stability on ties, missing-value
//! placement, and the set/replace/clear control semantics.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{lead, lead_columns, lead_config, Lead};
use gridcore::types::{SortDirection, SortState};
use gridcore::{sort, Grid};

fn rows() -> Vec<Lead> {
    vec![
        lead(1, "Ada", "Zeta", "new", Some(90.0)),
        lead(2, "Bob", "Acme", "new", Some(90.0)),
        lead(3, "Cid", "Acme", "lost", Some(75.0)),
        lead(4, "Dee", "Mid", "new", None),
        lead(5, "Eve", "Acme", "new", Some(99.0)),
    ]
}

fn all_indices(rows: &[Lead]) -> Vec<usize> {
    (0..rows.len()).collect()
}

#[test]
fn test_single_column_ascending() {
    let rows = rows();
    let columns = lead_columns();
    let mut state = SortState::default();
    state.set("name", SortDirection::Ascending);

    let ordered = sort::apply(&rows, &columns, &all_indices(&rows), &state);
    assert_eq!(ordered, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_multi_column_precedence_with_tie_break() {
    let rows = rows();
    let columns = lead_columns();
    let mut state = SortState::default();
    state.set("company", SortDirection::Ascending);
    state.set("score", SortDirection::Descending);

    // Acme first (Eve 99, Bob 90, Cid 75), then Mid, then Zeta
    let ordered = sort::apply(&rows, &columns, &all_indices(&rows), &state);
    assert_eq!(ordered, vec![4, 1, 2, 3, 0]);
}

#[test]
fn test_ties_preserve_original_relative_order() {
    let rows = rows();
    let columns = lead_columns();
    let mut state = SortState::default();
    // Ada and Bob tie on score 90; Ada precedes Bob in the input and must
    // still precede after sorting
    state.set("score", SortDirection::Descending);

    let ordered = sort::apply(&rows, &columns, &all_indices(&rows), &state);
    assert_eq!(ordered, vec![4, 0, 1, 2, 3]);
}

#[test]
fn test_missing_values_sort_last_in_both_directions() {
    let rows = rows();
    let columns = lead_columns();

    let mut asc = SortState::default();
    asc.set("score", SortDirection::Ascending);
    let ordered = sort::apply(&rows, &columns, &all_indices(&rows), &asc);
    assert_eq!(*ordered.last().unwrap(), 3);

    let mut desc = SortState::default();
    desc.set("score", SortDirection::Descending);
    let ordered = sort::apply(&rows, &columns, &all_indices(&rows), &desc);
    assert_eq!(*ordered.last().unwrap(), 3);
}

#[test]
fn test_sort_does_not_mutate_input_order() {
    let rows = rows();
    let columns = lead_columns();
    let indices = all_indices(&rows);
    let mut state = SortState::default();
    state.set("name", SortDirection::Descending);

    let _ = sort::apply(&rows, &columns, &indices, &state);
    assert_eq!(indices, all_indices(&rows));
}

#[test]
fn test_grid_sort_click_replaces_direction_in_place() {
    let mut config = lead_config("leads");
    config.rows = rows();
    let mut grid = Grid::new(config).unwrap();

    grid.sort_ascending("company");
    grid.sort_descending("score");
    // Clicking company's descending control replaces its direction but keeps
    // its precedence ahead of score
    grid.sort_descending("company");

    let names: Vec<String> = grid.page_rows().iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Ada", "Dee", "Eve", "Bob", "Cid"]);
}

#[test]
fn test_grid_clear_sort_restores_source_order() {
    let mut config = lead_config("leads");
    config.rows = rows();
    let mut grid = Grid::new(config).unwrap();

    grid.sort_descending("name");
    grid.clear_sort();
    let ids: Vec<u64> = grid.page_rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_unknown_or_unsortable_column_is_ignored() {
    let mut config = lead_config("leads");
    for c in &mut config.columns {
        if c.id == "status" {
            c.sortable = false;
        }
    }
    config.rows = rows();
    let mut grid = Grid::new(config).unwrap();

    grid.sort_descending("nonexistent");
    grid.sort_descending("status");
    assert!(grid.sort_state().is_empty());
}
