use std::fmt;

use super::CellValue;

/// Unique column identifier within a table configuration
pub type ColumnId = String;

/// Stable, unique row identifier
pub type RowId = String;

/// Extracts a displayable/sortable/filterable value from a row.
///
/// Returning `None` marks the field as missing: it never matches a filter and
/// sorts after every present value.
pub type Accessor<R> = Box<dyn Fn(&R) -> Option<CellValue>>;

/// A column descriptor mapping an opaque row to a cell value.
///
/// The engine never inspects row semantics beyond what the accessor extracts.
pub struct Column<R> {
    /// Unique id within the table configuration
    pub id: ColumnId,
    /// Header label for the UI
    pub header: String,
    /// Value extraction function
    pub accessor: Accessor<R>,
    /// Whether sort controls apply to this column
    pub sortable: bool,
    /// Whether this column participates in the global text filter
    pub filterable: bool,
    /// Declared default visibility; the persisted visibility map overrides it
    pub visible: bool,
    /// Preferred width in pixels, if the caller lays columns out itself
    pub width: Option<f32>,
}

impl<R> Column<R> {
    /// Create a sortable, filterable, visible column.
    pub fn new(
        id: impl Into<ColumnId>,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> Option<CellValue> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Box::new(accessor),
            sortable: true,
            filterable: true,
            visible: true,
            width: None,
        }
    }

    /// Set whether sort controls apply to this column
    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set whether this column participates in the global text filter
    #[must_use]
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Set the declared default visibility
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the preferred width in pixels
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Extract this column's value from a row
    pub fn value(&self, row: &R) -> Option<CellValue> {
        (self.accessor)(row)
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("visible", &self.visible)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}
