//! Page slicing over the filtered+sorted row set, index clamping, and the
//! compact page-number window shown by pagination controls.

use serde::{Deserialize, Serialize};

use crate::types::PaginationState;

/// How far from the current page neighbouring page numbers stay visible
/// before collapsing into an ellipsis.
const WINDOW_RADIUS: usize = 2;

/// The slice of the row set covered by the current page.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice {
    /// Total number of pages (0 when the row set is empty)
    pub page_count: usize,
    /// First row index on the page (inclusive)
    pub range_start: usize,
    /// One past the last row index on the page
    pub range_end: usize,
}

/// One entry in the rendered page-number strip
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PageItem {
    /// A clickable 0-based page number
    Page(usize),
    /// A gap between non-consecutive page numbers
    Ellipsis,
}

/// Number of pages needed for `total_rows` rows.
///
/// Returns 0 for an empty set; a zero `page_size` is treated as one page.
#[must_use]
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if total_rows == 0 {
        return 0;
    }
    total_rows.div_ceil(page_size.max(1))
}

/// Clamp `state.page_index` after an upstream change.
///
/// An index past the new last page clamps down to it (never silently back to
/// 0); an empty set clamps to 0.
pub fn clamp_page_index(state: &mut PaginationState, total_rows: usize) {
    let count = page_count(total_rows, state.page_size);
    state.page_index = state.page_index.min(count.saturating_sub(1));
}

/// Compute the row range covered by the current page.
///
/// The range is clamped to `total_rows`, so `range_end - range_start` is at
/// most `page_size` and both ends stay in bounds.
#[must_use]
pub fn paginate(total_rows: usize, state: &PaginationState) -> PageSlice {
    let page_size = state.page_size.max(1);
    let range_start = (state.page_index * page_size).min(total_rows);
    let range_end = (range_start + page_size).min(total_rows);
    PageSlice {
        page_count: page_count(total_rows, page_size),
        range_start,
        range_end,
    }
}

/// Page numbers to render in pagination controls.
///
/// Always includes page 0 and the last page, plus every page within
/// [`WINDOW_RADIUS`] of the current one; an [`PageItem::Ellipsis`] marks each
/// gap between included pages.
#[must_use]
pub fn page_window(page_count: usize, page_index: usize) -> Vec<PageItem> {
    let mut items = Vec::new();
    let mut previous: Option<usize> = None;
    for page in 0..page_count {
        let included = page == 0
            || page == page_count - 1
            || page.abs_diff(page_index) <= WINDOW_RADIUS;
        if !included {
            continue;
        }
        if let Some(prev) = previous {
            if page > prev + 1 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}
