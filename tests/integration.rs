//! End-to-end windowing scenarios: table in, grid and HTML out.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use vitrina::document::{Document, MemoryDocument};
use vitrina::source::{MemoryTableSource, TableSource};
use vitrina::{
    column_names, compute_grid, ColumnarTable, DisplayOptions, Error, Preview, PreviewOutcome,
    RenderOutcome, TableWindowRenderer,
};

/// Columns `a = [1, 2, 3]`, `b = ["x", "y", "z"]`.
fn abc_table() -> ColumnarTable {
    let schema = Arc::new(Schema::new(vec![
        Field::new("a", DataType::Int32, false),
        Field::new("b", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from(vec![1, 2, 3])),
            Arc::new(StringArray::from(vec!["x", "y", "z"])),
        ],
    )
    .unwrap();
    ColumnarTable::from_batch(batch).unwrap()
}

fn three_column_table() -> ColumnarTable {
    let schema = Arc::new(Schema::new(vec![
        Field::new("a", DataType::Int32, false),
        Field::new("b", DataType::Int32, false),
        Field::new("c", DataType::Int32, false),
    ]));
    let columns: Vec<ArrayRef> = (0..3)
        .map(|i| Arc::new(Int32Array::from(vec![i, i * 10])) as ArrayRef)
        .collect();
    ColumnarTable::from_batch(RecordBatch::try_new(schema, columns).unwrap()).unwrap()
}

fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
    cells
        .iter()
        .map(|r| r.iter().map(|c| (*c).to_string()).collect())
        .collect()
}

#[test]
fn test_first_row_page() {
    let grid = compute_grid(
        &abc_table(),
        &DisplayOptions::new("t").with_row_page_size(2).with_row_page(0),
    )
    .unwrap();
    assert_eq!(grid.header, vec!["a", "b"]);
    assert_eq!(grid.rows, rows(&[&["1", "x"], &["2", "y"]]));
}

#[test]
fn test_partial_last_row_page() {
    let grid = compute_grid(
        &abc_table(),
        &DisplayOptions::new("t").with_row_page_size(2).with_row_page(1),
    )
    .unwrap();
    assert_eq!(grid.rows, rows(&[&["3", "z"]]));
    assert_eq!(grid.row_offset, 2);
}

#[test]
fn test_row_page_past_end_is_empty() {
    let grid = compute_grid(
        &abc_table(),
        &DisplayOptions::new("t").with_row_page_size(2).with_row_page(5),
    )
    .unwrap();
    assert_eq!(grid.header, vec!["a", "b"]);
    assert!(grid.rows.is_empty());
}

#[test]
fn test_second_column_page() {
    let grid = compute_grid(
        &three_column_table(),
        &DisplayOptions::new("t").with_col_page_size(2).with_col_page(1),
    )
    .unwrap();
    assert_eq!(grid.header, vec!["c"]);
    assert_eq!(grid.rows, rows(&[&["2"], &["20"]]));
}

#[test]
fn test_null_cell_renders_empty() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("a", DataType::Int32, false),
        Field::new("b", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from(vec![1, 2])),
            Arc::new(StringArray::from(vec![Some("x"), None])),
        ],
    )
    .unwrap();
    let table = ColumnarTable::from_batch(batch).unwrap();

    let grid = compute_grid(&table, &DisplayOptions::new("t")).unwrap();
    assert_eq!(grid.cell(1, 1), Some(""));

    let doc = MemoryDocument::with_containers(["t"]);
    TableWindowRenderer::new()
        .render(&doc, &table, &DisplayOptions::new("t"))
        .unwrap();
    assert!(doc
        .inner_html("t")
        .unwrap()
        .contains("<tr><td>2</td><td></td></tr>"));
}

#[test]
fn test_missing_container_is_not_an_error() {
    let doc = MemoryDocument::with_containers(["arrow-table-preview"]);
    let outcome = TableWindowRenderer::new()
        .render(&doc, &abc_table(), &DisplayOptions::new("no-such-div"))
        .unwrap();

    assert_eq!(outcome, RenderOutcome::ContainerMissing);
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.inner_html("arrow-table-preview").as_deref(), Some(""));
    assert!(!doc.contains("no-such-div"));
}

#[test]
fn test_consecutive_pages_are_contiguous() {
    let table = ColumnarTable::from_batch(
        RecordBatch::try_new(
            Arc::new(Schema::new(vec![Field::new("n", DataType::Int32, false)])),
            vec![Arc::new(Int32Array::from((0..23).collect::<Vec<_>>()))],
        )
        .unwrap(),
    )
    .unwrap();

    let mut seen = Vec::new();
    for page in 0..5 {
        let grid = compute_grid(
            &table,
            &DisplayOptions::new("t").with_row_page_size(5).with_row_page(page),
        )
        .unwrap();
        assert_eq!(grid.row_offset, (page * 5).min(23));
        seen.extend(grid.rows.into_iter().map(|r| r[0].parse::<i32>().unwrap()));
    }
    assert_eq!(seen, (0..23).collect::<Vec<_>>());
}

#[test]
fn test_visible_columns_reorder_and_drop_unknown() {
    let grid = compute_grid(
        &abc_table(),
        &DisplayOptions::new("t").with_visible_columns(["b", "zzz", "a"]),
    )
    .unwrap();
    assert_eq!(grid.header, vec!["b", "a"]);
    assert_eq!(grid.rows[0], vec!["x", "1"]);
}

#[test]
fn test_visible_columns_strict_rejects_unknown() {
    let result = compute_grid(
        &abc_table(),
        &DisplayOptions::new("t")
            .with_visible_columns(["b", "zzz"])
            .strict(),
    );
    assert!(matches!(result, Err(Error::ColumnNotFound { name }) if name == "zzz"));
}

#[test]
fn test_render_escapes_cell_text() {
    let schema = Arc::new(Schema::new(vec![Field::new("<h>", DataType::Utf8, false)]));
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(StringArray::from(vec!["<script>alert('x')</script>"]))],
    )
    .unwrap();
    let table = ColumnarTable::from_batch(batch).unwrap();
    let doc = MemoryDocument::with_containers(["t"]);
    TableWindowRenderer::new()
        .render(&doc, &table, &DisplayOptions::new("t"))
        .unwrap();

    let html = doc.inner_html("t").unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("<th>&lt;h&gt;</th>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_fetch_then_render_pipeline() {
    let source = MemoryTableSource::new();
    source.insert_table("/arrow_preview", &abc_table()).unwrap();

    let names = column_names(&source.fetch("/arrow_preview").await.unwrap());
    assert_eq!(names, vec!["a", "b"]);

    let preview = Preview::new(source);
    let doc = MemoryDocument::with_containers(["arrow-table-preview"]);
    let outcome = preview
        .load(
            &doc,
            "/arrow_preview",
            &DisplayOptions::new("arrow-table-preview").with_row_page_size(10),
        )
        .await
        .unwrap();

    assert_eq!(outcome, PreviewOutcome::Rendered { rows: 3, columns: 2 });
    assert_eq!(
        doc.inner_html("arrow-table-preview").unwrap(),
        "<table><thead><tr><th>a</th><th>b</th></tr></thead><tbody>\
         <tr><td>1</td><td>x</td></tr><tr><td>2</td><td>y</td></tr>\
         <tr><td>3</td><td>z</td></tr></tbody></table>"
    );
}

#[tokio::test]
async fn test_failed_fetch_shows_inline_error() {
    let preview = Preview::new(MemoryTableSource::new());
    let doc = MemoryDocument::with_containers(["arrow-table-preview"]);

    let err = preview
        .load(&doc, "/arrow_preview", &DisplayOptions::new("arrow-table-preview"))
        .await
        .unwrap_err();

    assert!(err.is_load_failure());
    assert_eq!(
        doc.inner_html("arrow-table-preview").unwrap(),
        "<div class=\"vitrina-error\">Failed to load preview.</div>"
    );
}
