use serde::{Deserialize, Serialize};

/// Current page position and size.
///
/// Invariant (maintained by the pagination engine): `page_index` stays in
/// `0..page_count`, where `page_count = ceil(filtered_rows / page_size)`.
/// When an upstream change shrinks the row set, the index is clamped down to
/// the last valid page, never silently reset to 0 unless the set is empty.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// 0-based page index
    pub page_index: usize,
    /// Rows per page; must be non-zero
    pub page_size: usize,
}

impl PaginationState {
    /// Start at page 0 with the given page size
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(50)
    }
}
