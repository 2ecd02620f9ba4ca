//! Writes table windows into a [`Document`].

use crate::document::Document;
use crate::error::Result;
use crate::grid::{compute_grid, RenderGrid};
use crate::html::grid_to_html;
use crate::options::DisplayOptions;
use crate::table::ColumnarTable;

/// What a render call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The target container now holds the table.
    Rendered {
        /// Body rows written
        rows: usize,
        /// Columns written
        columns: usize,
    },
    /// The target container does not exist; nothing was written.
    ContainerMissing,
}

impl RenderOutcome {
    /// Check if the container received the table.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Renders windows of a [`ColumnarTable`] as HTML tables.
///
/// Stateless: every call is a pure grid computation followed by a single
/// container write. The table is only borrowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableWindowRenderer;

impl TableWindowRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self
    }

    /// Compute the grid without touching any document.
    ///
    /// # Errors
    ///
    /// Same as [`compute_grid`].
    pub fn grid(&self, table: &ColumnarTable, options: &DisplayOptions) -> Result<RenderGrid> {
        compute_grid(table, options)
    }

    /// Render a window of `table` into the container `options.target_id`.
    ///
    /// A missing container is not an error: a warning is logged and
    /// [`RenderOutcome::ContainerMissing`] is returned with the document
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) for
    /// invalid options and [`Error::ColumnNotFound`](crate::Error::ColumnNotFound)
    /// for unknown columns under the strict policy.
    pub fn render<D: Document + ?Sized>(
        &self,
        document: &D,
        table: &ColumnarTable,
        options: &DisplayOptions,
    ) -> Result<RenderOutcome> {
        options.validate()?;

        let target = options.target_id.as_str();
        if !document.contains(target) {
            log::warn!("render: element with id '{target}' not found");
            return Ok(RenderOutcome::ContainerMissing);
        }

        let grid = compute_grid(table, options)?;
        let outcome = RenderOutcome::Rendered {
            rows: grid.num_rows(),
            columns: grid.num_columns(),
        };

        if !document.replace_inner_html(target, grid_to_html(&grid)) {
            // Removed between the check and the write.
            log::warn!("render: element with id '{target}' disappeared before write");
            return Ok(RenderOutcome::ContainerMissing);
        }

        log::debug!("rendered {outcome:?} into '{target}'");
        Ok(outcome)
    }
}
