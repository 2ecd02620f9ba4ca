//! vitrina - Paginated HTML previews of Arrow IPC tables
//!
//! Fetches a columnar table in the Arrow IPC format, cuts out one page of
//! rows and columns, and renders it as an HTML `<table>` into a named
//! container.
//!
//! # Design Principles
//!
//! 1. **Pure core** - [`compute_grid`] is a side-effect free function of a
//!    table and [`DisplayOptions`]
//! 2. **Escaped output** - header and cell text is always HTML escaped
//! 3. **Latest request wins** - [`Preview`] discards responses superseded by
//!    a newer request
//! 4. **Arrow native** - tables stay as Arrow `RecordBatch`es
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use vitrina::arrow::array::{Int32Array, RecordBatch, StringArray};
//! use vitrina::arrow::datatypes::{DataType, Field, Schema};
//! use vitrina::document::MemoryDocument;
//! use vitrina::document::Document;
//! use vitrina::{ColumnarTable, DisplayOptions, TableWindowRenderer};
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::Int32, false),
//!     Field::new("name", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int32Array::from(vec![1, 2, 3])),
//!         Arc::new(StringArray::from(vec![Some("a"), None, Some("<c>")])),
//!     ],
//! )
//! .unwrap();
//! let table = ColumnarTable::from_batch(batch).unwrap();
//!
//! let doc = MemoryDocument::with_containers(["preview"]);
//! let options = DisplayOptions::new("preview").with_row_page_size(2).with_row_page(1);
//! TableWindowRenderer::new().render(&doc, &table, &options).unwrap();
//!
//! let html = doc.inner_html("preview").unwrap();
//! assert!(html.contains("<td>&lt;c&gt;</td>"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::similar_names
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod grid;
pub mod html;
pub mod options;
pub mod paging;
pub mod preview;
pub mod render;
pub mod source;
pub mod table;
pub mod window;

// Re-exports for convenience
pub use arrow;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use grid::{compute_grid, RenderGrid};
pub use html::{escape_html, grid_to_html};
pub use options::{DisplayOptions, UnknownColumns};
pub use paging::PageState;
pub use preview::{Preview, PreviewOutcome, Ticket};
pub use render::{RenderOutcome, TableWindowRenderer};
pub use source::{column_names, decode_ipc, TableSource};
pub use table::ColumnarTable;
