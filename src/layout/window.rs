//! Fixed-row-height virtualization: computes the sub-range of a long list
//! that must be rendered to cover the visible viewport plus overscan, and the
//! pixel offset the caller uses to position the rendered slice inside the
//! full-height scroll container.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Scroll recompute cadence; roughly one animation frame.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// The computed window over the row set.
///
/// `start_index..=end_index` fully covers every row intersecting the viewport
/// plus `overscan` rows on each side, clamped to the row count. `offset_y` is
/// the pixel position of the first rendered row; `total_height` sizes the
/// scroll container so native scrollbar behavior is preserved without
/// rendering all rows.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRange {
    /// First rendered row index (inclusive)
    pub start_index: usize,
    /// Last rendered row index (inclusive)
    pub end_index: usize,
    /// Pixel offset of the first rendered row
    pub offset_y: f64,
    /// Full height of the row set in pixels
    pub total_height: f64,
}

/// Convert a pixel position to a row index, rounding toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn row_at(px: f64, row_height: f64) -> usize {
    let index = (px / row_height).floor();
    if index <= 0.0 {
        0
    } else {
        index as usize
    }
}

/// Convert a pixel position to the row index just past it, rounding up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn row_past(px: f64, row_height: f64) -> usize {
    let index = (px / row_height).ceil();
    if index <= 0.0 {
        0
    } else {
        index as usize
    }
}

/// Compute the rendered range for a scroll position.
///
/// Out-of-bounds inputs are clamped rather than rejected: a negative
/// `scroll_top` behaves like 0, a scroll past the end renders the tail, and a
/// non-positive `row_height` degrades to rendering the whole set.
#[must_use]
pub fn compute_range(
    scroll_top: f64,
    viewport_height: f64,
    row_height: f64,
    row_count: usize,
    overscan: usize,
) -> VirtualRange {
    if row_count == 0 {
        return VirtualRange {
            start_index: 0,
            end_index: 0,
            offset_y: 0.0,
            total_height: 0.0,
        };
    }
    let last = row_count - 1;
    if row_height <= 0.0 {
        return VirtualRange {
            start_index: 0,
            end_index: last,
            offset_y: 0.0,
            total_height: 0.0,
        };
    }

    let total_height = row_count as f64 * row_height;
    let scroll_top = scroll_top.clamp(0.0, total_height);

    let start_index = row_at(scroll_top, row_height)
        .saturating_sub(overscan)
        .min(last);
    let end_index = row_past(scroll_top + viewport_height.max(0.0), row_height)
        .saturating_add(overscan)
        .min(last);

    VirtualRange {
        start_index,
        end_index,
        offset_y: start_index as f64 * row_height,
        total_height,
    }
}

/// Throttles scroll-driven recomputation to frame cadence.
///
/// Scroll events arrive per pixel; admitting each one would recompute the
/// window continuously. The throttle admits at most one position per
/// interval and keeps the latest suppressed position as a trailing value, so
/// the final scroll offset is never dropped - the host polls
/// [`poll`](Self::poll) on its next tick to pick it up.
#[derive(Debug)]
pub struct ScrollThrottle {
    interval: Duration,
    last_admitted: Option<Instant>,
    trailing: Option<f64>,
}

impl ScrollThrottle {
    /// Throttle at animation-frame cadence
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(FRAME_INTERVAL)
    }

    /// Throttle at a custom interval
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_admitted: None,
            trailing: None,
        }
    }

    /// Offer a scroll position at `now`; returns it if admitted.
    ///
    /// A suppressed position replaces any earlier trailing value.
    pub fn on_scroll(&mut self, scroll_top: f64, now: Instant) -> Option<f64> {
        let due = self
            .last_admitted
            .is_none_or(|last| now.duration_since(last) >= self.interval);
        if due {
            self.last_admitted = Some(now);
            self.trailing = None;
            Some(scroll_top)
        } else {
            self.trailing = Some(scroll_top);
            None
        }
    }

    /// Admit the trailing position once the interval has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        let due = self
            .last_admitted
            .is_none_or(|last| now.duration_since(last) >= self.interval);
        if due && self.trailing.is_some() {
            self.last_admitted = Some(now);
            return self.trailing.take();
        }
        None
    }

    /// Forget all state; called on disposal and when the row set changes.
    pub fn reset(&mut self) {
        self.last_admitted = None;
        self.trailing = None;
    }
}

impl Default for ScrollThrottle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_range_matches_reference_scenario() {
        // rowHeight=50, viewportHeight=400, overscan=5, scrollTop=1000,
        // rowCount=1000 -> [15, 33]
        let range = compute_range(1000.0, 400.0, 50.0, 1000, 5);
        assert_eq!(range.start_index, 15);
        assert_eq!(range.end_index, 33);
        assert_eq!(range.offset_y, 750.0);
        assert_eq!(range.total_height, 50_000.0);
    }

    #[test]
    fn test_range_clamps_at_edges() {
        let top = compute_range(-100.0, 400.0, 50.0, 100, 5);
        assert_eq!(top.start_index, 0);

        let bottom = compute_range(1.0e9, 400.0, 50.0, 100, 5);
        assert_eq!(bottom.end_index, 99);
        assert!(bottom.start_index <= bottom.end_index);
    }

    #[test]
    fn test_empty_row_set_yields_empty_window() {
        let range = compute_range(500.0, 400.0, 50.0, 0, 5);
        assert_eq!(range.start_index, 0);
        assert_eq!(range.end_index, 0);
        assert_eq!(range.total_height, 0.0);
    }

    #[test]
    fn test_throttle_admits_first_and_keeps_trailing() {
        let mut throttle = ScrollThrottle::new();
        let t0 = Instant::now();

        assert_eq!(throttle.on_scroll(10.0, t0), Some(10.0));
        // Within the same frame: suppressed, held as trailing
        assert_eq!(throttle.on_scroll(20.0, t0 + Duration::from_millis(5)), None);
        assert_eq!(throttle.on_scroll(30.0, t0 + Duration::from_millis(10)), None);

        // Next frame: the final position comes through intact
        assert_eq!(throttle.poll(t0 + Duration::from_millis(20)), Some(30.0));
        assert_eq!(throttle.poll(t0 + Duration::from_millis(40)), None);
    }
}
