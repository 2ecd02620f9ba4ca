//! In-memory document.

use std::{collections::HashMap, sync::RwLock};

use super::Document;

/// An in-memory set of containers keyed by id.
///
/// Useful for tests, for the CLI, and for server-side rendering where there
/// is no browser page. Containers must be registered before a render can
/// write into them.
///
/// # Example
///
/// ```
/// use vitrina::document::{Document, MemoryDocument};
///
/// let doc = MemoryDocument::with_containers(["preview"]);
/// assert!(doc.replace_inner_html("preview", "<table></table>".into()));
/// assert!(!doc.replace_inner_html("other", "<table></table>".into()));
/// assert_eq!(doc.inner_html("preview").as_deref(), Some("<table></table>"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocument {
    containers: RwLock<HashMap<String, String>>,
}

impl MemoryDocument {
    /// Creates a document with no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document with empty containers for each id.
    pub fn with_containers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let containers = ids
            .into_iter()
            .map(|id| (id.into(), String::new()))
            .collect();
        Self {
            containers: RwLock::new(containers),
        }
    }

    /// Registers an empty container, keeping existing content if present.
    pub fn add_container(&self, id: impl Into<String>) {
        if let Ok(mut containers) = self.containers.write() {
            containers.entry(id.into()).or_default();
        }
    }

    /// Removes a container and returns its content.
    pub fn remove_container(&self, id: &str) -> Option<String> {
        self.containers.write().ok()?.remove(id)
    }

    /// Returns the number of containers.
    pub fn len(&self) -> usize {
        self.containers.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if there are no containers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Document for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.containers
            .read()
            .map(|c| c.contains_key(id))
            .unwrap_or(false)
    }

    fn replace_inner_html(&self, id: &str, html: String) -> bool {
        let Ok(mut containers) = self.containers.write() else {
            return false;
        };
        match containers.get_mut(id) {
            Some(content) => {
                *content = html;
                true
            }
            None => false,
        }
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.containers.read().ok()?.get(id).cloned()
    }
}
