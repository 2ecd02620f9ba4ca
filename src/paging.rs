//! Page navigation state
//!
//! Tracks the current page over a fixed item count, with bounded
//! next/previous/first/last moves. Use one `PageState` per axis and feed
//! `page()` back into [`DisplayOptions`](crate::DisplayOptions) on re-render.

use std::ops::Range;

use crate::window::page_count;

/// Current page over `total` items split into pages of `page_size`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageState {
    /// Zero-based current page
    page: usize,
    /// Total number of items on this axis
    total: usize,
    /// Items per page
    page_size: usize,
}

impl PageState {
    /// Create a page state positioned on the first page.
    ///
    /// # Arguments
    /// * `total` - Number of rows (or columns) being paged
    /// * `page_size` - Items per page; zero is treated as one
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            page: 0,
            total,
            page_size: page_size.max(1),
        }
    }

    /// Current zero-based page.
    #[inline]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total item count.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pages, at least one so an empty table still has page 0.
    pub fn page_count(&self) -> usize {
        page_count(self.total, self.page_size).max(1)
    }

    /// Jump to `page`, clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = self.clamp_page(page);
    }

    /// Update the item count, re-clamping the current page.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.page = self.clamp_page(self.page);
    }

    /// Change the page size while keeping the first visible item on screen.
    pub fn set_page_size(&mut self, page_size: usize) {
        let first = self.range().start;
        self.page_size = page_size.max(1);
        self.page = self.clamp_page(first / self.page_size);
    }

    /// Check if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count()
    }

    /// Check if an earlier page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Advance one page; stays put on the last page.
    pub fn next(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    /// Go back one page; stays put on the first page.
    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Jump to the first page.
    pub fn first(&mut self) {
        self.page = 0;
    }

    /// Jump to the last page.
    pub fn last(&mut self) {
        self.page = self.page_count() - 1;
    }

    /// Item indices shown on the current page.
    pub fn range(&self) -> Range<usize> {
        let start = self.page.saturating_mul(self.page_size).min(self.total);
        let end = start.saturating_add(self.page_size).min(self.total);
        start..end
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.min(self.page_count() - 1)
    }
}
