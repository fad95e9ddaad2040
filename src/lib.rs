//! gridcore - headless data-grid engine
//!
//! Composes filtering, multi-column sorting, pagination, row virtualization,
//! row selection, and persisted column visibility into one synchronous derive
//! pipeline over abstract rows and column descriptors:
//! - Global text filter (debounced) plus per-column filters
//! - Stable multi-key sort with missing values ordered last
//! - Page slicing with a compact page-number window, or a virtual scroll
//!   window over fixed-height rows
//! - Tri-state select-all keyed by stable row ids
//! - Column visibility persisted through a pluggable key-value store
//!
//! The engine is UI-agnostic and performs no I/O beyond the injected
//! persistence interface. A host (GUI, TUI, WASM shell, server-side view)
//! supplies rows, drives mutations from its event loop, and renders whatever
//! [`Grid::state`] hands back.
//!
//! # Usage
//!
//! ```
//! use gridcore::{CellValue, Column, Grid, GridConfig};
//!
//! struct Lead { id: u64, name: &'static str, score: f64 }
//!
//! let columns = vec![
//!     Column::new("name", "Name", |r: &Lead| Some(CellValue::text(r.name))),
//!     Column::new("score", "Score", |r: &Lead| Some(CellValue::Number(r.score))),
//! ];
//! let config = GridConfig::new("leads", columns, |r: &Lead| r.id.to_string());
//! let mut grid = Grid::new(config).unwrap();
//! grid.set_rows(vec![Lead { id: 1, name: "Ada", score: 92.0 }]);
//! grid.sort_descending("score");
//! assert_eq!(grid.page_rows().len(), 1);
//! ```

// State and descriptor types
pub mod types;

// Engine modules
pub mod error;
pub mod filter;
pub mod layout;
pub mod pagination;
pub mod selection;
pub mod sort;
pub mod visibility;

// Composition root
pub mod grid;

pub use error::{GridError, Result};
pub use filter::Debouncer;
pub use grid::{Grid, GridConfig, RenderState};
pub use layout::{ScrollThrottle, VirtualRange};
pub use pagination::{PageItem, PageSlice};
pub use selection::{Selection, SelectionSummary};
pub use visibility::{ColumnVisibilityStore, KeyValueStorage, MemoryStorage};

pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
