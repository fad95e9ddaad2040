//! Grid controller: wires filtering, sorting, pagination/virtualization,
//! selection, and column visibility into one synchronous derive pipeline.
//!
//! The derived row set is a pure function of the input states
//! (rows -> filter -> sort -> paginate | virtualize) and is memoized on a
//! version counter bumped by every mutation, so repeated reads between
//! mutations cost nothing. All mutations are discrete synchronous calls from
//! the host's event loop; the only asynchronous boundaries are the filter
//! debounce and the scroll throttle, both driven through [`Grid::tick`].

use std::collections::HashSet;
use std::time::Instant;

use crate::error::{GridError, Result};
use crate::filter::{self, Debouncer};
use crate::layout::{self, ScrollThrottle, VirtualRange};
use crate::pagination::{self, PageItem, PageSlice};
use crate::selection::{Selection, SelectionSummary};
use crate::sort;
use crate::types::{
    Column, FilterState, PaginationState, RowId, SortDirection, SortState,
};
use crate::visibility::{ColumnVisibilityStore, KeyValueStorage, MemoryStorage};

type RowIdFn<R> = Box<dyn Fn(&R) -> RowId>;
type RowClickFn<R> = Box<dyn FnMut(&R)>;
type SelectionChangeFn = Box<dyn FnMut(&HashSet<RowId>)>;
type ExportFn<R> = Box<dyn FnMut(&[&R])>;

/// Everything a grid instance is created with.
///
/// Pagination and virtualization are mutually exclusive presentation modes;
/// enabling both is a configuration error at [`Grid::new`].
pub struct GridConfig<R> {
    /// Persistence key for per-table state (column visibility)
    pub table_id: String,
    /// Column descriptors; ids must be unique
    pub columns: Vec<Column<R>>,
    /// Initial row set; may be replaced wholesale later via [`Grid::set_rows`]
    pub rows: Vec<R>,
    /// Stable row identity
    pub row_id: RowIdFn<R>,
    pub page_size: usize,
    pub enable_filtering: bool,
    pub enable_sorting: bool,
    pub enable_pagination: bool,
    pub enable_virtualization: bool,
    pub enable_selection: bool,
    pub enable_column_visibility: bool,
    /// Fixed row height in pixels (virtualization mode)
    pub row_height: f64,
    /// Extra rows rendered on each side of the viewport (virtualization mode)
    pub overscan: usize,
    /// Viewport height in pixels (virtualization mode)
    pub viewport_height: f64,
    /// Visibility persistence medium; defaults to in-memory when omitted
    pub storage: Option<Box<dyn KeyValueStorage>>,
}

impl<R> GridConfig<R> {
    /// Config with every feature except virtualization enabled and a page
    /// size of 50.
    pub fn new(
        table_id: impl Into<String>,
        columns: Vec<Column<R>>,
        row_id: impl Fn(&R) -> RowId + 'static,
    ) -> Self {
        Self {
            table_id: table_id.into(),
            columns,
            rows: Vec::new(),
            row_id: Box::new(row_id),
            page_size: 50,
            enable_filtering: true,
            enable_sorting: true,
            enable_pagination: true,
            enable_virtualization: false,
            enable_selection: true,
            enable_column_visibility: true,
            row_height: 28.0,
            overscan: 5,
            viewport_height: 600.0,
            storage: None,
        }
    }

    /// Switch to virtualized presentation (disables pagination).
    #[must_use]
    pub fn virtualized(mut self, row_height: f64, overscan: usize, viewport_height: f64) -> Self {
        self.enable_pagination = false;
        self.enable_virtualization = true;
        self.row_height = row_height;
        self.overscan = overscan;
        self.viewport_height = viewport_height;
        self
    }

    /// Set the visibility persistence medium.
    #[must_use]
    pub fn storage(mut self, storage: Box<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }
}

/// What the host should render.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderState<'a, R> {
    /// Row loading failed; render the message, no rows are processed
    Error(&'a str),
    /// No rows survive the current filters; a distinct "no rows" signal
    Empty,
    /// The current render set: a page, a virtual window, or the whole
    /// filtered+sorted set
    Rows(Vec<&'a R>),
}

/// The composition root: one grid instance over one row set.
pub struct Grid<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    row_id: RowIdFn<R>,

    enable_filtering: bool,
    enable_sorting: bool,
    enable_pagination: bool,
    enable_virtualization: bool,
    enable_selection: bool,

    filter_state: FilterState,
    debouncer: Debouncer,
    sort_state: SortState,
    pagination_state: PaginationState,

    row_height: f64,
    overscan: usize,
    viewport_height: f64,
    scroll_top: f64,
    throttle: ScrollThrottle,

    selection: Selection,
    visibility: Option<ColumnVisibilityStore>,
    data_error: Option<String>,

    // Filtered+sorted positions into `rows`, memoized on `version`
    derived: Vec<usize>,
    version: u64,
    derived_version: Option<u64>,

    on_row_click: Option<RowClickFn<R>>,
    on_selection_change: Option<SelectionChangeFn>,
    on_export: Option<ExportFn<R>>,
}

impl<R> Grid<R> {
    /// Build a grid from its configuration.
    ///
    /// # Errors
    /// `GridError::Config` when pagination and virtualization are both
    /// enabled, when the paginated page size is zero, or when column ids
    /// collide.
    pub fn new(config: GridConfig<R>) -> Result<Self> {
        if config.enable_pagination && config.enable_virtualization {
            return Err(GridError::Config(
                "pagination and virtualization are mutually exclusive".to_string(),
            ));
        }
        if config.enable_pagination && config.page_size == 0 {
            return Err(GridError::Config("page size must be non-zero".to_string()));
        }
        let mut seen = HashSet::new();
        for column in &config.columns {
            if !seen.insert(column.id.clone()) {
                return Err(GridError::Config(format!(
                    "duplicate column id: {}",
                    column.id
                )));
            }
        }

        let visibility = if config.enable_column_visibility {
            let storage = config
                .storage
                .unwrap_or_else(|| Box::new(MemoryStorage::new()));
            let defaults = config
                .columns
                .iter()
                .map(|c| (c.id.clone(), c.visible));
            Some(ColumnVisibilityStore::load(
                storage,
                config.table_id,
                defaults,
            ))
        } else {
            None
        };

        let mut grid = Self {
            columns: config.columns,
            rows: config.rows,
            row_id: config.row_id,
            enable_filtering: config.enable_filtering,
            enable_sorting: config.enable_sorting,
            enable_pagination: config.enable_pagination,
            enable_virtualization: config.enable_virtualization,
            enable_selection: config.enable_selection,
            filter_state: FilterState::default(),
            debouncer: Debouncer::new(),
            sort_state: SortState::default(),
            pagination_state: PaginationState::new(config.page_size),
            row_height: config.row_height,
            overscan: config.overscan,
            viewport_height: config.viewport_height,
            scroll_top: 0.0,
            throttle: ScrollThrottle::new(),
            selection: Selection::new(),
            visibility,
            data_error: None,
            derived: Vec::new(),
            version: 0,
            derived_version: None,
            on_row_click: None,
            on_selection_change: None,
            on_export: None,
        };
        grid.sync_visibility();
        Ok(grid)
    }

    // -- input mutations ----------------------------------------------------

    /// Replace the row set wholesale.
    ///
    /// Recomputes the pipeline, clamps the page index, resets the virtual
    /// scroll to the top, and prunes selections for rows that no longer
    /// exist.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.data_error = None;
        if self.enable_selection {
            let live: HashSet<RowId> = self.rows.iter().map(|r| (self.row_id)(r)).collect();
            if self.selection.retain_live(&live) {
                self.notify_selection();
            }
        }
        self.upstream_changed();
    }

    /// Feed a global-filter keystroke into the debouncer.
    ///
    /// The value applies via [`tick`](Self::tick) once input has settled for
    /// the debounce delay.
    pub fn set_global_filter(&mut self, text: impl Into<String>, now: Instant) {
        if self.enable_filtering {
            self.debouncer.input(text, now);
        }
    }

    /// Set or clear one column's filter (empty value clears).
    pub fn set_column_filter(&mut self, column_id: &str, value: impl Into<String>) {
        if self.enable_filtering {
            self.filter_state.set_column_filter(column_id, value);
            self.upstream_changed();
        }
    }

    /// Remove one column's filter.
    pub fn clear_column_filter(&mut self, column_id: &str) {
        self.set_column_filter(column_id, "");
    }

    /// Set or replace a column's sort to ascending (a column's ascending
    /// control).
    pub fn sort_ascending(&mut self, column_id: &str) {
        self.set_sort(column_id, SortDirection::Ascending);
    }

    /// Set or replace a column's sort to descending.
    pub fn sort_descending(&mut self, column_id: &str) {
        self.set_sort(column_id, SortDirection::Descending);
    }

    /// Clear the whole sort state (the explicit "clear sort" action).
    pub fn clear_sort(&mut self) {
        if !self.sort_state.is_empty() {
            self.sort_state.clear();
            self.upstream_changed();
        }
    }

    fn set_sort(&mut self, column_id: &str, direction: SortDirection) {
        if !self.enable_sorting {
            return;
        }
        // Controls on unknown or unsortable columns are ignored, not errors
        let sortable = self
            .columns
            .iter()
            .any(|c| c.id == column_id && c.sortable);
        if sortable {
            self.sort_state.set(column_id, direction);
            self.upstream_changed();
        }
    }

    /// Jump to a page; an out-of-range index clamps to the last valid page
    /// immediately.
    pub fn set_page_index(&mut self, page_index: usize) {
        self.derive_if_needed();
        self.pagination_state.page_index = page_index;
        if self.enable_pagination {
            pagination::clamp_page_index(&mut self.pagination_state, self.derived.len());
        }
        self.mark_dirty();
    }

    /// Change the page size (clamped to at least 1); the page index re-clamps
    /// against the new page count immediately.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.derive_if_needed();
        self.pagination_state.page_size = page_size.max(1);
        if self.enable_pagination {
            pagination::clamp_page_index(&mut self.pagination_state, self.derived.len());
        }
        self.mark_dirty();
    }

    /// Offer a scroll position (virtualization mode), throttled to frame
    /// cadence; suppressed positions surface through [`tick`](Self::tick).
    pub fn on_scroll(&mut self, scroll_top: f64, now: Instant) {
        if !self.enable_virtualization {
            return;
        }
        if let Some(admitted) = self.throttle.on_scroll(scroll_top, now) {
            self.scroll_top = admitted;
        }
    }

    /// Update the viewport height after a container resize.
    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    /// Drive the debounce and throttle deadlines from the host loop.
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.debouncer.poll(now) {
            self.filter_state.global_text = text;
            self.upstream_changed();
        }
        if let Some(trailing) = self.throttle.poll(now) {
            self.scroll_top = trailing;
        }
    }

    /// Record that row loading failed; [`state`](Self::state) reports it
    /// until the next successful [`set_rows`](Self::set_rows).
    pub fn set_data_error(&mut self, message: impl Into<String>) {
        self.data_error = Some(message.into());
    }

    /// Cancel the pending debounce and detach all callbacks.
    ///
    /// Call when the hosting view goes away so no timer or listener outlives
    /// the container.
    pub fn dispose(&mut self) {
        self.debouncer.cancel();
        self.throttle.reset();
        self.on_row_click = None;
        self.on_selection_change = None;
        self.on_export = None;
    }

    // -- derived outputs ----------------------------------------------------

    /// What the host should render right now.
    pub fn state(&mut self) -> RenderState<'_, R> {
        self.derive_if_needed();
        if let Some(message) = &self.data_error {
            return RenderState::Error(message);
        }
        let positions = self.render_positions();
        let rows: Vec<&R> = positions.iter().filter_map(|&i| self.rows.get(i)).collect();
        if rows.is_empty() {
            RenderState::Empty
        } else {
            RenderState::Rows(rows)
        }
    }

    /// The current render set: a page, a virtual window, or the whole
    /// filtered+sorted set.
    pub fn render_rows(&mut self) -> Vec<&R> {
        self.derive_if_needed();
        let positions = self.render_positions();
        positions
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .collect()
    }

    /// Rows on the current page (whole derived set when pagination is off).
    pub fn page_rows(&mut self) -> Vec<&R> {
        self.render_rows()
    }

    /// Page bounds for the current state.
    pub fn page_slice(&mut self) -> PageSlice {
        self.derive_if_needed();
        pagination::paginate(self.derived.len(), &self.pagination_state)
    }

    /// Page numbers (with ellipsis gaps) for pagination controls.
    pub fn page_window(&mut self) -> Vec<PageItem> {
        let slice = self.page_slice();
        pagination::page_window(slice.page_count, self.pagination_state.page_index)
    }

    /// The virtual window for the current scroll position.
    pub fn virtual_range(&mut self) -> VirtualRange {
        self.derive_if_needed();
        layout::compute_range(
            self.scroll_top,
            self.viewport_height,
            self.row_height,
            self.derived.len(),
            self.overscan,
        )
    }

    /// Number of rows surviving the current filters.
    pub fn filtered_count(&mut self) -> usize {
        self.derive_if_needed();
        self.derived.len()
    }

    /// Number of rows in the source set.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    /// Columns currently shown, honoring the persisted visibility map.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&Column<R>> {
        self.columns.iter().filter(|c| c.visible).collect()
    }

    /// Current filter inputs.
    #[must_use]
    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    /// Current sort precedence list.
    #[must_use]
    pub fn sort_state(&self) -> &SortState {
        &self.sort_state
    }

    /// Current page position. Page mutations clamp eagerly; an upstream
    /// shrink re-clamps on the next derive.
    #[must_use]
    pub fn pagination_state(&self) -> &PaginationState {
        &self.pagination_state
    }

    // -- selection ----------------------------------------------------------

    /// Flip one row's selection.
    pub fn toggle_selection(&mut self, row_id: impl Into<RowId>) {
        if self.enable_selection {
            self.selection.toggle(row_id);
            self.notify_selection();
        }
    }

    /// Tri-state toggle: over the current page in paginated mode, over the
    /// whole filtered set otherwise.
    pub fn toggle_all_on_page(&mut self) {
        if self.enable_selection {
            let ids = self.selection_scope_ids();
            self.selection.toggle_all_on_page(&ids);
            self.notify_selection();
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        if self.enable_selection && !self.selection.is_empty() {
            self.selection.clear();
            self.notify_selection();
        }
    }

    #[must_use]
    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selection.is_selected(row_id)
    }

    /// Select-all summary over the same scope as
    /// [`toggle_all_on_page`](Self::toggle_all_on_page).
    pub fn selection_summary(&mut self) -> SelectionSummary {
        let ids = self.selection_scope_ids();
        self.selection.summary(&ids)
    }

    /// The selection set itself.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // -- column visibility --------------------------------------------------

    /// Flip one column's visibility and persist immediately.
    ///
    /// No-op when column visibility is disabled.
    pub fn toggle_column(&mut self, column_id: &str) -> Result<()> {
        let Some(store) = &mut self.visibility else {
            return Ok(());
        };
        store.toggle(column_id)?;
        self.sync_visibility();
        // Global filtering scopes to visible columns
        self.upstream_changed();
        Ok(())
    }

    // -- export -------------------------------------------------------------

    /// Rows handed to the export collaborator: the selected rows, or all
    /// currently filtered rows when nothing is selected.
    pub fn export_rows(&mut self) -> Vec<&R> {
        self.derive_if_needed();
        self.export_candidates()
    }

    /// Hand the export rows to the `on_export` callback.
    pub fn request_export(&mut self) {
        self.derive_if_needed();
        let Some(mut callback) = self.on_export.take() else {
            return;
        };
        let rows = self.export_candidates();
        callback(rows.as_slice());
        drop(rows);
        self.on_export = Some(callback);
    }

    // -- callbacks ----------------------------------------------------------

    /// Invoke the `on_row_click` callback for a row id.
    pub fn row_clicked(&mut self, row_id: &str) {
        let Some(mut callback) = self.on_row_click.take() else {
            return;
        };
        if let Some(row) = self.rows.iter().find(|r| (self.row_id)(r) == row_id) {
            callback(row);
        }
        self.on_row_click = Some(callback);
    }

    pub fn on_row_click(&mut self, callback: impl FnMut(&R) + 'static) {
        self.on_row_click = Some(Box::new(callback));
    }

    pub fn on_selection_change(&mut self, callback: impl FnMut(&HashSet<RowId>) + 'static) {
        self.on_selection_change = Some(Box::new(callback));
    }

    pub fn on_export(&mut self, callback: impl FnMut(&[&R]) + 'static) {
        self.on_export = Some(Box::new(callback));
    }

    // -- internals ----------------------------------------------------------

    fn mark_dirty(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// A change to the filtered/sorted row set: recompute, and reset the
    /// virtual scroll so the window never points at a stale offset.
    fn upstream_changed(&mut self) {
        self.mark_dirty();
        if self.enable_virtualization {
            self.scroll_top = 0.0;
            self.throttle.reset();
        }
    }

    fn derive_if_needed(&mut self) {
        if self.derived_version == Some(self.version) {
            return;
        }
        let filtered: Vec<usize> = if self.enable_filtering {
            filter::apply(&self.rows, &self.columns, &self.filter_state)
        } else {
            (0..self.rows.len()).collect()
        };
        self.derived = if self.enable_sorting {
            sort::apply(&self.rows, &self.columns, &filtered, &self.sort_state)
        } else {
            filtered
        };
        if self.enable_pagination {
            pagination::clamp_page_index(&mut self.pagination_state, self.derived.len());
        }
        self.derived_version = Some(self.version);
    }

    /// Positions (into `rows`) of the current render set; assumes
    /// `derive_if_needed` ran.
    fn render_positions(&self) -> Vec<usize> {
        if self.enable_pagination {
            let slice = pagination::paginate(self.derived.len(), &self.pagination_state);
            self.derived
                .get(slice.range_start..slice.range_end)
                .map(<[usize]>::to_vec)
                .unwrap_or_default()
        } else if self.enable_virtualization {
            let range = layout::compute_range(
                self.scroll_top,
                self.viewport_height,
                self.row_height,
                self.derived.len(),
                self.overscan,
            );
            if self.derived.is_empty() {
                Vec::new()
            } else {
                self.derived
                    .get(range.start_index..=range.end_index)
                    .map(<[usize]>::to_vec)
                    .unwrap_or_default()
            }
        } else {
            self.derived.clone()
        }
    }

    /// Ids the select-all control operates on: the current page in paginated
    /// mode, the whole filtered set otherwise. The virtual scroll window is a
    /// render detail and never narrows the scope.
    fn selection_scope_ids(&mut self) -> Vec<RowId> {
        self.derive_if_needed();
        let positions: Vec<usize> = if self.enable_pagination {
            self.render_positions()
        } else {
            self.derived.clone()
        };
        positions
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .map(|row| (self.row_id)(row))
            .collect()
    }

    fn export_candidates(&self) -> Vec<&R> {
        if self.enable_selection && !self.selection.is_empty() {
            self.rows
                .iter()
                .filter(|r| self.selection.is_selected(&(self.row_id)(r)))
                .collect()
        } else {
            self.derived
                .iter()
                .filter_map(|&i| self.rows.get(i))
                .collect()
        }
    }

    fn notify_selection(&mut self) {
        let Some(mut callback) = self.on_selection_change.take() else {
            return;
        };
        callback(self.selection.ids());
        self.on_selection_change = Some(callback);
    }

    /// Mirror the persisted visibility map onto the column descriptors so
    /// filtering and `visible_columns` read one source of truth.
    fn sync_visibility(&mut self) {
        let Some(store) = &self.visibility else {
            return;
        };
        for column in &mut self.columns {
            column.visible = store.is_visible(&column.id);
        }
    }
}

impl<R> std::fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns.len())
            .field("filter_state", &self.filter_state)
            .field("sort_state", &self.sort_state)
            .field("pagination_state", &self.pagination_state)
            .field("selection", &self.selection.len())
            .field("data_error", &self.data_error)
            .finish_non_exhaustive()
    }
}
