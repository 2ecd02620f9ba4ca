//! Render-ready table windows.
//!
//! [`compute_grid`] is the pure core of rendering: it resolves the visible
//! columns and rows for a [`DisplayOptions`] and materializes them as display
//! strings. It has no side effects, so identical inputs give identical grids.

use crate::error::Result;
use crate::options::DisplayOptions;
use crate::table::{display_or_empty, ColumnarTable};
use crate::window::{page_columns, resolve_columns, row_window};

/// A windowed, display-ready projection of a [`ColumnarTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderGrid {
    /// Column labels, one per displayed column.
    pub header: Vec<String>,
    /// Cell text per displayed row, in ascending absolute row order.
    pub rows: Vec<Vec<String>>,
    /// Absolute index of the first displayed row.
    pub row_offset: usize,
    /// Row count of the source table.
    pub total_rows: usize,
}

impl RenderGrid {
    /// Number of body rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the header.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.header.len()
    }

    /// Check if the grid has no body rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at a grid-relative position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Compute the visible window of `table` described by `options`.
///
/// 1. Columns: `visible_columns` or every schema column, then one column page
///    when `col_page_size` is set.
/// 2. Rows: `min(row_page_size, num_rows - row_page * row_page_size)`,
///    clamped at zero.
/// 3. Cells: null renders as the empty string.
///
/// Pages past the end produce empty grids, not errors. `target_id` is not
/// consulted here.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`](crate::Error::ColumnNotFound) for an
/// unknown visible column under [`UnknownColumns::Reject`](crate::UnknownColumns::Reject).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use arrow::array::{Int32Array, RecordBatch, StringArray};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use vitrina::{compute_grid, ColumnarTable, DisplayOptions};
///
/// let schema = Arc::new(Schema::new(vec![
///     Field::new("a", DataType::Int32, false),
///     Field::new("b", DataType::Utf8, false),
/// ]));
/// let batch = RecordBatch::try_new(
///     schema,
///     vec![
///         Arc::new(Int32Array::from(vec![1, 2, 3])),
///         Arc::new(StringArray::from(vec!["x", "y", "z"])),
///     ],
/// )
/// .unwrap();
/// let table = ColumnarTable::from_batch(batch).unwrap();
///
/// let grid = compute_grid(&table, &DisplayOptions::new("t").with_row_page_size(2).with_row_page(1))
///     .unwrap();
/// assert_eq!(grid.header, vec!["a", "b"]);
/// assert_eq!(grid.rows, vec![vec!["3".to_string(), "z".to_string()]]);
/// ```
pub fn compute_grid(table: &ColumnarTable, options: &DisplayOptions) -> Result<RenderGrid> {
    let cols_to_show = resolve_columns(table, options)?;
    let header = page_columns(&cols_to_show, options.col_page_size, options.col_page);
    let window = row_window(table.num_rows(), options.row_page_size, options.row_page);

    log::debug!(
        "grid window: rows {:?} of {}, {} of {} columns",
        window.rows(),
        table.num_rows(),
        header.len(),
        cols_to_show.len()
    );

    // Resolved names exist in the schema; a miss would only yield empty cells.
    let col_indices: Vec<Option<usize>> =
        header.iter().map(|name| table.column_index(name)).collect();

    let rows = window
        .rows()
        .map(|row| {
            col_indices
                .iter()
                .map(|col| display_or_empty(col.and_then(|c| table.cell(row, c))))
                .collect()
        })
        .collect();

    Ok(RenderGrid {
        header,
        rows,
        row_offset: window.offset,
        total_rows: table.num_rows(),
    })
}
