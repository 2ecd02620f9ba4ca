//! Property-based tests for grid windowing and IPC decoding.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use proptest::prelude::*;
use vitrina::source::encode_ipc;
use vitrina::{compute_grid, decode_ipc, ColumnarTable, DisplayOptions, Error};

/// `num_cols` columns `c0..`, cell `(r, c)` holds `r * 1000 + c`, every
/// seventh row null in column 0. Split across batches of `batch_rows`.
fn numbered_table(num_rows: usize, num_cols: usize, batch_rows: usize) -> ColumnarTable {
    let schema = Arc::new(Schema::new(
        (0..num_cols)
            .map(|c| Field::new(format!("c{c}"), DataType::Int64, true))
            .collect::<Vec<_>>(),
    ));
    let batch_rows = batch_rows.max(1);
    let mut batches = Vec::new();
    let mut start = 0;
    while start < num_rows {
        let end = (start + batch_rows).min(num_rows);
        let columns: Vec<ArrayRef> = (0..num_cols)
            .map(|c| {
                let values: Vec<Option<i64>> = (start..end)
                    .map(|r| {
                        if c == 0 && r % 7 == 3 {
                            None
                        } else {
                            Some((r * 1000 + c) as i64)
                        }
                    })
                    .collect();
                Arc::new(Int64Array::from(values)) as ArrayRef
            })
            .collect();
        batches.push(RecordBatch::try_new(Arc::clone(&schema), columns).unwrap());
        start = end;
    }
    ColumnarTable::from_batches(batches, schema).unwrap()
}

fn expected_cell(row: usize, col: usize) -> String {
    if col == 0 && row % 7 == 3 {
        String::new()
    } else {
        (row * 1000 + col).to_string()
    }
}

proptest! {
    /// Property: row count is max(0, min(page_size, num_rows - page * page_size))
    #[test]
    fn prop_row_count(
        num_rows in 0usize..60,
        batch_rows in 1usize..20,
        page_size in 1usize..25,
        page in 0usize..10,
    ) {
        let table = numbered_table(num_rows, 2, batch_rows);
        let options = DisplayOptions::new("t").with_row_page_size(page_size).with_row_page(page);
        let grid = compute_grid(&table, &options).unwrap();

        let expected = page_size.min(num_rows.saturating_sub(page * page_size));
        prop_assert_eq!(grid.rows.len(), expected);
    }

    /// Property: every row is as wide as the header
    #[test]
    fn prop_rectangular(
        num_rows in 0usize..30,
        num_cols in 1usize..8,
        col_page_size in proptest::option::of(1usize..5),
        col_page in 0usize..4,
    ) {
        let table = numbered_table(num_rows, num_cols, 8);
        let mut options = DisplayOptions::new("t").with_col_page(col_page);
        options.col_page_size = col_page_size;
        let grid = compute_grid(&table, &options).unwrap();

        for row in &grid.rows {
            prop_assert_eq!(row.len(), grid.header.len());
        }
    }

    /// Property: without a column page size, col_page has no effect
    #[test]
    fn prop_col_page_ignored_without_size(num_cols in 1usize..8, col_page in 0usize..100) {
        let table = numbered_table(3, num_cols, 2);
        let paged = compute_grid(&table, &DisplayOptions::new("t").with_col_page(col_page)).unwrap();
        let unpaged = compute_grid(&table, &DisplayOptions::new("t")).unwrap();
        prop_assert_eq!(paged.header.len(), num_cols);
        prop_assert_eq!(paged, unpaged);
    }

    /// Property: identical inputs give identical grids
    #[test]
    fn prop_deterministic(
        num_rows in 0usize..40,
        page_size in 1usize..10,
        page in 0usize..6,
    ) {
        let table = numbered_table(num_rows, 3, 7);
        let options = DisplayOptions::new("t").with_row_page_size(page_size).with_row_page(page);
        prop_assert_eq!(
            compute_grid(&table, &options).unwrap(),
            compute_grid(&table, &options).unwrap()
        );
    }

    /// Property: cells come from absolute row page * page_size + i, nulls empty
    #[test]
    fn prop_cells_match_source(
        num_rows in 1usize..50,
        batch_rows in 1usize..13,
        page_size in 1usize..12,
        page in 0usize..5,
    ) {
        let table = numbered_table(num_rows, 3, batch_rows);
        let options = DisplayOptions::new("t").with_row_page_size(page_size).with_row_page(page);
        let grid = compute_grid(&table, &options).unwrap();

        for (i, row) in grid.rows.iter().enumerate() {
            let absolute = page * page_size + i;
            for (col, cell) in row.iter().enumerate() {
                prop_assert_eq!(cell, &expected_cell(absolute, col));
            }
        }
    }

    /// Property: pages k and k+1 are disjoint and contiguous
    #[test]
    fn prop_adjacent_pages_contiguous(
        num_rows in 0usize..50,
        page_size in 1usize..10,
        page in 0usize..6,
    ) {
        let table = numbered_table(num_rows, 1, 9);
        let first = compute_grid(
            &table,
            &DisplayOptions::new("t").with_row_page_size(page_size).with_row_page(page),
        )
        .unwrap();
        let second = compute_grid(
            &table,
            &DisplayOptions::new("t").with_row_page_size(page_size).with_row_page(page + 1),
        )
        .unwrap();

        let start = (page * page_size).min(num_rows);
        let end = ((page + 2) * page_size).min(num_rows);
        prop_assert_eq!(first.rows.len() + second.rows.len(), end - start);
        if !second.rows.is_empty() {
            prop_assert_eq!(first.rows.len(), page_size);
        }
    }

    /// Property: huge page indices never panic and yield no rows
    #[test]
    fn prop_huge_pages_are_empty(page in (usize::MAX / 2)..usize::MAX, page_size in 1usize..100) {
        let table = numbered_table(10, 2, 4);
        let options = DisplayOptions::new("t")
            .with_row_page_size(page_size)
            .with_row_page(page)
            .with_col_page_size(1)
            .with_col_page(page);
        let grid = compute_grid(&table, &options).unwrap();
        prop_assert!(grid.rows.is_empty());
        prop_assert!(grid.header.is_empty());
    }

    /// Property: corrupting any bytes of a payload yields a table or a decode error
    #[test]
    fn prop_corrupted_payload_is_decode_error(
        num_rows in 1usize..20,
        batch_rows in 1usize..8,
        edits in proptest::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..4),
    ) {
        let mut bytes = encode_ipc(&numbered_table(num_rows, 2, batch_rows)).unwrap().to_vec();
        for (idx, value) in edits {
            let at = idx.index(bytes.len());
            bytes[at] = value;
        }

        let result = decode_ipc(&bytes);
        prop_assert!(
            matches!(result, Ok(_) | Err(Error::Decode { .. })),
            "unexpected {:?}",
            result
        );
    }
}
