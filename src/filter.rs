//! Row filtering: global text match plus per-column predicates, and the
//! debouncer that collapses rapid global-text keystrokes.
//!
//! The global text matches case-insensitively against the stringified value
//! of every visible, filterable column (a row passes if any such field
//! matches); each active column filter must match the value produced by that
//! column's accessor. A row must satisfy both.

use std::time::{Duration, Instant};

use crate::types::{CellValue, Column, FilterState};

/// Delay after the last keystroke before the global text filter applies.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// True if `value` contains `needle_lower` case-insensitively.
///
/// `needle_lower` must already be lowercased; missing values never match.
fn value_contains(value: Option<&CellValue>, needle_lower: &str) -> bool {
    match value {
        Some(v) => v.to_string().to_lowercase().contains(needle_lower),
        None => false,
    }
}

/// Does `row` pass the global text and all active column filters?
pub fn row_matches<R>(row: &R, columns: &[Column<R>], state: &FilterState) -> bool {
    // Global text: OR across visible, filterable columns. Empty text skips
    // the step entirely.
    if !state.global_text.is_empty() {
        let needle = state.global_text.to_lowercase();
        let any_match = columns
            .iter()
            .filter(|c| c.visible && c.filterable)
            .any(|c| value_contains(c.value(row).as_ref(), &needle));
        if !any_match {
            return false;
        }
    }

    // Column filters: AND across all non-empty predicates. A filter on an
    // unknown column id matches nothing on that column and rejects the row.
    for (column_id, predicate) in &state.column_filters {
        if predicate.is_empty() {
            continue;
        }
        let needle = predicate.to_lowercase();
        let value = columns
            .iter()
            .find(|c| &c.id == column_id)
            .and_then(|c| c.value(row));
        if !value_contains(value.as_ref(), &needle) {
            return false;
        }
    }

    true
}

/// Apply `state` to `rows`, returning the indices of matching rows in their
/// original order.
pub fn apply<R>(rows: &[R], columns: &[Column<R>], state: &FilterState) -> Vec<usize> {
    if state.is_empty() {
        return (0..rows.len()).collect();
    }
    rows.iter()
        .enumerate()
        .filter(|&(_, row)| row_matches(row, columns, state))
        .map(|(i, _)| i)
        .collect()
}

/// Deadline-based debouncer for the global text input.
///
/// The engine runs cooperatively inside a host event loop and owns no timer
/// runtime, so the debounce is a polled deadline: [`input`](Self::input)
/// records the latest text and re-arms the deadline (cancelling the previous
/// one), and [`poll`](Self::poll) hands the settled value back once the delay
/// has elapsed with no further input. Rapid keystrokes within the window
/// collapse to a single application of the last value.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    /// Debouncer with the standard 300ms delay
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(DEBOUNCE_DELAY)
    }

    /// Debouncer with a custom delay
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke at `now`, replacing any pending value and re-arming
    /// the deadline.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    /// Take the settled value if the deadline has passed.
    ///
    /// Returns `None` while input is still settling or nothing is pending.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let settled = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if settled {
            self.pending.take().map(|(text, _)| text)
        } else {
            None
        }
    }

    /// Drop any pending value; called on disposal.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// True while a value is waiting for its deadline
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
