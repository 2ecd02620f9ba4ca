//! Render targets for HTML tables.
//!
//! A [`Document`] is the host-side collection of containers addressed by
//! string id, the counterpart of a browser page's elements. The renderer
//! only needs to check for a container and replace its content.

pub mod memory;

pub use memory::MemoryDocument;

/// A set of addressable containers that accept HTML content.
///
/// Implementations use interior mutability so a shared document can be
/// written by successive renders.
pub trait Document: Send + Sync {
    /// Whether a container with this id exists.
    fn contains(&self, id: &str) -> bool;

    /// Replace the container's content with `html`.
    ///
    /// Returns `false` without changing anything if the container does not
    /// exist.
    fn replace_inner_html(&self, id: &str, html: String) -> bool;

    /// Current content of the container, if it exists.
    fn inner_html(&self, id: &str) -> Option<String>;
}

impl<D: Document + ?Sized> Document for &D {
    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }

    fn replace_inner_html(&self, id: &str, html: String) -> bool {
        (**self).replace_inner_html(id, html)
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        (**self).inner_html(id)
    }
}

impl<D: Document + ?Sized> Document for std::sync::Arc<D> {
    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }

    fn replace_inner_html(&self, id: &str, html: String) -> bool {
        (**self).replace_inner_html(id, html)
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        (**self).inner_html(id)
    }
}
