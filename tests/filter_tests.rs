//! Filtering tests: global OR semantics, per-column AND semantics, the
//! visible+filterable scope of the global match, debounce behavior, and the
//! filter idempotence property.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::time::{Duration, Instant};

use common::{lead, lead_columns, lead_config, Lead};
use gridcore::types::FilterState;
use gridcore::{filter, CellValue, Column, Grid};

fn rows() -> Vec<Lead> {
    vec![
        lead(1, "Ada Lovelace", "Analytical", "new", Some(95.0)),
        lead(2, "Grace Hopper", "Navy", "qualified", Some(88.0)),
        lead(3, "Alan Turing", "Bletchley", "contacted", Some(92.0)),
        lead(4, "Edsger Dijkstra", "Eindhoven", "new", None),
    ]
}

#[test]
fn test_global_text_matches_any_column() {
    let rows = rows();
    let columns = lead_columns();
    let state = FilterState {
        global_text: "navy".to_string(),
        ..FilterState::default()
    };

    // "navy" appears only in Grace's company field
    let matched = filter::apply(&rows, &columns, &state);
    assert_eq!(matched, vec![1]);
}

#[test]
fn test_global_text_is_case_insensitive_substring() {
    let rows = rows();
    let columns = lead_columns();
    let state = FilterState {
        global_text: "LOVE".to_string(),
        ..FilterState::default()
    };
    assert_eq!(filter::apply(&rows, &columns, &state), vec![0]);
}

#[test]
fn test_column_filters_are_anded() {
    let rows = rows();
    let columns = lead_columns();
    let mut state = FilterState::default();
    state.set_column_filter("status", "new");

    assert_eq!(filter::apply(&rows, &columns, &state), vec![0, 3]);

    state.set_column_filter("company", "eind");
    assert_eq!(filter::apply(&rows, &columns, &state), vec![3]);
}

#[test]
fn test_global_and_column_filters_combine() {
    let rows = rows();
    let columns = lead_columns();
    let mut state = FilterState {
        global_text: "a".to_string(),
        ..FilterState::default()
    };
    state.set_column_filter("status", "new");

    // Global "a" matches every row somewhere; status narrows to 0 and 3
    assert_eq!(filter::apply(&rows, &columns, &state), vec![0, 3]);
}

#[test]
fn test_hidden_or_unfilterable_columns_excluded_from_global_match() {
    let rows = rows();
    let mut columns = lead_columns();
    // Hide "company": "navy" should no longer match anything
    for c in &mut columns {
        if c.id == "company" {
            c.visible = false;
        }
    }
    let state = FilterState {
        global_text: "navy".to_string(),
        ..FilterState::default()
    };
    assert!(filter::apply(&rows, &columns, &state).is_empty());

    // Unfilterable behaves the same as hidden for the global match
    let mut columns = lead_columns();
    for c in &mut columns {
        if c.id == "company" {
            c.filterable = false;
        }
    }
    assert!(filter::apply(&rows, &columns, &state).is_empty());
}

#[test]
fn test_missing_accessor_value_never_matches() {
    let rows = rows();
    let columns = lead_columns();
    let mut state = FilterState::default();
    // Dijkstra has no score; a score filter can only reject him
    state.set_column_filter("score", "9");
    let matched = filter::apply(&rows, &columns, &state);
    assert!(!matched.contains(&3));
}

#[test]
fn test_empty_rows_yield_empty_result() {
    let rows: Vec<Lead> = Vec::new();
    let columns = lead_columns();
    let state = FilterState {
        global_text: "anything".to_string(),
        ..FilterState::default()
    };
    assert!(filter::apply(&rows, &columns, &state).is_empty());
}

#[test]
fn test_filter_is_idempotent() {
    let rows = rows();
    let columns = lead_columns();
    let mut state = FilterState {
        global_text: "a".to_string(),
        ..FilterState::default()
    };
    state.set_column_filter("status", "new");

    let once = filter::apply(&rows, &columns, &state);
    let projected: Vec<Lead> = once.iter().map(|&i| rows[i].clone()).collect();
    let twice = filter::apply(&projected, &columns, &state);

    // Filtering an already-filtered set keeps every row
    assert_eq!(twice.len(), once.len());
    assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
}

#[test]
fn test_grid_debounce_applies_last_value_once() {
    let mut config = lead_config("leads");
    config.rows = rows();
    let mut grid = Grid::new(config).unwrap();
    let t0 = Instant::now();

    grid.set_global_filter("a", t0);
    grid.set_global_filter("ad", t0 + Duration::from_millis(100));
    grid.set_global_filter("ada", t0 + Duration::from_millis(200));

    // Nothing applies while keystrokes are still settling
    grid.tick(t0 + Duration::from_millis(400));
    assert_eq!(grid.filter_state().global_text, "");
    assert_eq!(grid.filtered_count(), 4);

    // One application, using only the last typed value
    grid.tick(t0 + Duration::from_millis(500));
    assert_eq!(grid.filter_state().global_text, "ada");
    assert_eq!(grid.filtered_count(), 1);
}

#[test]
fn test_accessor_returning_none_degrades_not_panics() {
    let rows = vec![1u32, 2, 3];
    let columns: Vec<Column<u32>> = vec![Column::new("broken", "Broken", |_: &u32| None)];
    let state = FilterState {
        global_text: "1".to_string(),
        ..FilterState::default()
    };
    // Every value is missing: nothing matches, nothing aborts
    assert!(filter::apply(&rows, &columns, &state).is_empty());

    let ok: Vec<Column<u32>> = vec![Column::new("n", "N", |r: &u32| {
        Some(CellValue::Number(f64::from(*r)))
    })];
    assert_eq!(filter::apply(&rows, &ok, &state), vec![0]);
}
