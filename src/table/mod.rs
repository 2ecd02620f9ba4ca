//! Decoded columnar tables
//!
//! [`ColumnarTable`] is the in-memory form of an Arrow IPC payload: an
//! ordered schema plus one or more record batches. Rows are addressed
//! globally; the table locates the owning batch through cumulative offsets.

mod format;

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch};
use arrow::datatypes::{DataType, Schema, SchemaRef};

pub use format::{display_or_empty, format_array_value};

use crate::error::{Error, Result};

/// A read-only columnar table: schema, record batches and a fixed row count.
///
/// Every column spans exactly [`num_rows`](Self::num_rows) values across the
/// batches. The table is never mutated after construction, so renderers
/// borrow it freely.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use arrow::array::{Int32Array, RecordBatch, StringArray};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use vitrina::ColumnarTable;
///
/// let schema = Arc::new(Schema::new(vec![
///     Field::new("a", DataType::Int32, false),
///     Field::new("b", DataType::Utf8, true),
/// ]));
/// let batch = RecordBatch::try_new(
///     schema.clone(),
///     vec![
///         Arc::new(Int32Array::from(vec![1, 2, 3])),
///         Arc::new(StringArray::from(vec!["x", "y", "z"])),
///     ],
/// )
/// .unwrap();
///
/// let table = ColumnarTable::from_batches(vec![batch], schema).unwrap();
/// assert_eq!(table.num_rows(), 3);
/// assert_eq!(table.column_names(), vec!["a", "b"]);
/// assert_eq!(table.cell_by_name(2, "b"), Some("z".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct ColumnarTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    num_rows: usize,
    /// Cumulative row offsets, `batch_offsets[i]` is the first row of batch `i`
    batch_offsets: Vec<usize>,
}

impl ColumnarTable {
    /// Build a table from record batches sharing `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if a batch's schema differs from `schema` or
    /// two columns share a name.
    pub fn from_batches(batches: Vec<RecordBatch>, schema: SchemaRef) -> Result<Self> {
        check_unique_names(&schema)?;
        for (idx, batch) in batches.iter().enumerate() {
            if batch.schema().fields() != schema.fields() {
                return Err(Error::decode(format!(
                    "batch {idx} schema does not match table schema"
                )));
            }
        }

        let mut batch_offsets = Vec::with_capacity(batches.len() + 1);
        batch_offsets.push(0);
        let mut offset = 0;
        for batch in &batches {
            offset += batch.num_rows();
            batch_offsets.push(offset);
        }

        Ok(Self {
            schema,
            batches,
            num_rows: offset,
            batch_offsets,
        })
    }

    /// Build a single-batch table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if two columns share a name.
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        let schema = batch.schema();
        Self::from_batches(vec![batch], schema)
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            schema: Arc::new(Schema::empty()),
            batches: Vec::new(),
            num_rows: 0,
            batch_offsets: vec![0],
        }
    }

    /// Schema shared by every batch.
    #[inline]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Record batches in row order.
    #[inline]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total rows across all batches.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns in the schema.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Check if table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Position of the named column in the schema.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name).ok()
    }

    /// Check if the schema has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Locate a global row as `(batch_index, row_within_batch)`.
    pub fn locate_row(&self, global_row: usize) -> Option<(usize, usize)> {
        if global_row >= self.num_rows {
            return None;
        }

        // Empty batches produce repeated offsets; the last batch starting at or
        // before the row is the one holding it.
        let batch_idx = self
            .batch_offsets
            .partition_point(|&start| start <= global_row)
            .saturating_sub(1);

        let batch_start = self.batch_offsets.get(batch_idx).copied().unwrap_or(0);
        Some((batch_idx, global_row - batch_start))
    }

    /// The array slice holding `(row, col)`, with the row rebased to that array.
    fn slot(&self, row: usize, col: usize) -> Option<(&ArrayRef, usize)> {
        if col >= self.num_columns() {
            return None;
        }
        let (batch_idx, local_row) = self.locate_row(row)?;
        let batch = self.batches.get(batch_idx)?;
        Some((batch.column(col), local_row))
    }

    /// Display string of a cell, `None` for null or out-of-range positions.
    pub fn cell(&self, row: usize, col: usize) -> Option<String> {
        let (array, local_row) = self.slot(row, col)?;
        format_array_value(array.as_ref(), local_row)
    }

    /// Display string of a cell addressed by column name.
    pub fn cell_by_name(&self, row: usize, name: &str) -> Option<String> {
        self.cell(row, self.column_index(name)?)
    }

    /// Whether the cell holds a null value. Out-of-range positions are not null.
    pub fn is_null(&self, row: usize, col: usize) -> bool {
        self.slot(row, col)
            .is_some_and(|(array, local_row)| {
                array.is_null(local_row) || array.data_type() == &DataType::Null
            })
    }
}

impl Default for ColumnarTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// Column names must be unique: headers and visible columns address columns by name.
fn check_unique_names(schema: &Schema) -> Result<()> {
    let mut seen = HashSet::with_capacity(schema.fields().len());
    for field in schema.fields() {
        if !seen.insert(field.name().as_str()) {
            return Err(Error::decode(format!(
                "duplicate column name '{}'",
                field.name()
            )));
        }
    }
    Ok(())
}
