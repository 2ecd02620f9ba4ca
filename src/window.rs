//! Row and column window arithmetic.
//!
//! Pure functions: every page index is valid input, pages past the end
//! resolve to empty windows and products saturate instead of overflowing.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::options::{DisplayOptions, UnknownColumns};
use crate::table::ColumnarTable;

/// Contiguous window of rows, `[offset, offset + len)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowWindow {
    /// Absolute index of the first row.
    pub offset: usize,
    /// Number of rows in the window.
    pub len: usize,
}

impl RowWindow {
    /// Check if the window holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute row indices covered by the window.
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Resolve the effective column list: `visible_columns` if set, otherwise
/// every schema column in schema order.
///
/// # Errors
///
/// With [`UnknownColumns::Reject`], returns [`Error::ColumnNotFound`] for the
/// first requested name the schema lacks. With [`UnknownColumns::Drop`] such
/// names are skipped.
pub fn resolve_columns(table: &ColumnarTable, options: &DisplayOptions) -> Result<Vec<String>> {
    let Some(requested) = &options.visible_columns else {
        return Ok(table
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect());
    };

    let mut columns = Vec::with_capacity(requested.len());
    for name in requested {
        if table.has_column(name) {
            columns.push(name.clone());
            continue;
        }
        match options.unknown_columns {
            UnknownColumns::Drop => log::debug!("dropping unknown column '{name}'"),
            UnknownColumns::Reject => return Err(Error::column_not_found(name)),
        }
    }
    Ok(columns)
}

/// Slice one page out of `columns`.
///
/// Without a page size the list is returned unchanged regardless of `page`.
/// A page starting past the end yields an empty list.
pub fn page_columns(columns: &[String], page_size: Option<usize>, page: usize) -> Vec<String> {
    let Some(size) = page_size else {
        return columns.to_vec();
    };
    let start = page.saturating_mul(size).min(columns.len());
    let end = start.saturating_add(size).min(columns.len());
    columns[start..end].to_vec()
}

/// Row window for zero-based `page` of `page_size` rows over `num_rows` rows.
///
/// `len = min(page_size, num_rows - offset)` clamped at zero.
pub fn row_window(num_rows: usize, page_size: usize, page: usize) -> RowWindow {
    let offset = page.saturating_mul(page_size);
    let len = page_size.min(num_rows.saturating_sub(offset));
    RowWindow { offset, len }
}

/// Number of pages needed for `total` items, zero when there are none.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
