//! Fetch, decode and render as one sequential pipeline.
//!
//! Every load takes a [`Ticket`] from a monotonically increasing counter
//! before it starts fetching. When the fetch completes, the result is only
//! written if no newer load has started in the meantime, so a slow response
//! cannot overwrite a newer render.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::document::Document;
use crate::error::Result;
use crate::html::error_block;
use crate::options::DisplayOptions;
use crate::render::{RenderOutcome, TableWindowRenderer};
use crate::source::TableSource;
use crate::table::ColumnarTable;

/// Message shown in the target container when a load fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load preview.";

/// Identifies one load request; newer tickets supersede older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Generation this ticket was issued for.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What a pipeline run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The table window was written into the container.
    Rendered {
        /// Body rows written
        rows: usize,
        /// Columns written
        columns: usize,
    },
    /// The container does not exist; nothing was written.
    ContainerMissing,
    /// A newer request started before this one finished; its result was
    /// discarded.
    Superseded,
}

impl From<RenderOutcome> for PreviewOutcome {
    fn from(outcome: RenderOutcome) -> Self {
        match outcome {
            RenderOutcome::Rendered { rows, columns } => Self::Rendered { rows, columns },
            RenderOutcome::ContainerMissing => Self::ContainerMissing,
        }
    }
}

/// A table source paired with a renderer and a request generation counter.
///
/// # Example
///
/// ```
/// use vitrina::document::MemoryDocument;
/// use vitrina::source::MemoryTableSource;
/// use vitrina::{ColumnarTable, DisplayOptions, Preview, PreviewOutcome};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let source = MemoryTableSource::new();
/// source.insert_table("/arrow_preview", &ColumnarTable::empty()).unwrap();
///
/// let preview = Preview::new(source);
/// let doc = MemoryDocument::with_containers(["arrow-table-preview"]);
/// let outcome = preview
///     .load(&doc, "/arrow_preview", &DisplayOptions::new("arrow-table-preview"))
///     .await
///     .unwrap();
/// assert_eq!(outcome, PreviewOutcome::Rendered { rows: 0, columns: 0 });
/// # });
/// ```
#[derive(Debug)]
pub struct Preview<S> {
    source: S,
    renderer: TableWindowRenderer,
    generation: AtomicU64,
}

impl<S: TableSource> Preview<S> {
    /// Create a preview over `source` with generation 0.
    pub fn new(source: S) -> Self {
        Self {
            source,
            renderer: TableWindowRenderer::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// The underlying table source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generation of the most recently started request.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recent request.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation() == ticket.0
    }

    /// Fetch `location` and render it into `options.target_id`.
    ///
    /// # Errors
    ///
    /// Returns invalid options before fetching, fetch and decode failures
    /// after writing an inline error block into the container, and strict
    /// unknown-column errors from rendering.
    pub async fn load<D: Document + ?Sized>(
        &self,
        document: &D,
        location: &str,
        options: &DisplayOptions,
    ) -> Result<PreviewOutcome> {
        let ticket = self.begin();
        self.load_with_ticket(ticket, document, location, options)
            .await
    }

    /// Like [`load`](Self::load) with a ticket taken earlier by [`begin`](Self::begin).
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn load_with_ticket<D: Document + ?Sized>(
        &self,
        ticket: Ticket,
        document: &D,
        location: &str,
        options: &DisplayOptions,
    ) -> Result<PreviewOutcome> {
        options.validate()?;

        let fetched = self.source.fetch(location).await;

        if !self.is_current(ticket) {
            log::debug!(
                "discarding result of request {} for '{location}', superseded by {}",
                ticket.0,
                self.generation()
            );
            return Ok(PreviewOutcome::Superseded);
        }

        let table = match fetched {
            Ok(table) => table,
            Err(e) => {
                log::error!("preview of '{location}' failed: {e}");
                document.replace_inner_html(&options.target_id, error_block(LOAD_FAILED_MESSAGE));
                return Err(e);
            }
        };

        Ok(self.renderer.render(document, &table, options)?.into())
    }

    /// Render an already fetched table, e.g. after a page change.
    ///
    /// Counts as a new request, so loads still in flight will not overwrite it.
    ///
    /// # Errors
    ///
    /// Same as [`TableWindowRenderer::render`].
    pub fn rerender<D: Document + ?Sized>(
        &self,
        document: &D,
        table: &ColumnarTable,
        options: &DisplayOptions,
    ) -> Result<PreviewOutcome> {
        self.begin();
        Ok(self.renderer.render(document, table, options)?.into())
    }
}
