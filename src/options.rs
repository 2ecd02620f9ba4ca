//! Display options for windowed table rendering.
//!
//! Options deserialize from camelCase keys, so the same document works as a
//! TOML file or a JSON payload:
//!
//! ```
//! use vitrina::DisplayOptions;
//!
//! let options = DisplayOptions::from_json_str(
//!     r#"{"targetId": "preview", "rowPageSize": 25, "colPageSize": 4}"#,
//! )
//! .unwrap();
//! assert_eq!(options.row_page_size, 25);
//! assert_eq!(options.col_page_size, Some(4));
//! assert_eq!(options.row_page, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of rows per page.
pub const DEFAULT_ROW_PAGE_SIZE: usize = 50;

/// How `visible_columns` entries missing from the schema are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownColumns {
    /// Silently drop names the schema does not contain.
    #[default]
    Drop,
    /// Fail with [`Error::ColumnNotFound`] on the first unknown name.
    Reject,
}

/// Windowing and destination settings for one render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayOptions {
    /// Identifier of the destination container.
    pub target_id: String,
    /// Columns to show, in order. `None` shows every schema column.
    pub visible_columns: Option<Vec<String>>,
    /// Rows per page, must be positive.
    pub row_page_size: usize,
    /// Columns per page. `None` disables column paging.
    pub col_page_size: Option<usize>,
    /// Zero-based row page.
    pub row_page: usize,
    /// Zero-based column page, ignored without `col_page_size`.
    pub col_page: usize,
    /// Policy for unknown `visible_columns` entries.
    pub unknown_columns: UnknownColumns,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            target_id: String::new(),
            visible_columns: None,
            row_page_size: DEFAULT_ROW_PAGE_SIZE,
            col_page_size: None,
            row_page: 0,
            col_page: 0,
            unknown_columns: UnknownColumns::Drop,
        }
    }
}

impl DisplayOptions {
    /// Options targeting `target_id` with every other setting at its default.
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            ..Self::default()
        }
    }

    /// Restrict and order the displayed columns.
    #[must_use]
    pub fn with_visible_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set rows per page.
    #[must_use]
    pub fn with_row_page_size(mut self, size: usize) -> Self {
        self.row_page_size = size;
        self
    }

    /// Enable column paging with `size` columns per page.
    #[must_use]
    pub fn with_col_page_size(mut self, size: usize) -> Self {
        self.col_page_size = Some(size);
        self
    }

    /// Set the zero-based row page.
    #[must_use]
    pub fn with_row_page(mut self, page: usize) -> Self {
        self.row_page = page;
        self
    }

    /// Set the zero-based column page.
    #[must_use]
    pub fn with_col_page(mut self, page: usize) -> Self {
        self.col_page = page;
        self
    }

    /// Set the policy for visible column names the table lacks.
    #[must_use]
    pub fn with_unknown_columns(mut self, policy: UnknownColumns) -> Self {
        self.unknown_columns = policy;
        self
    }

    /// Shorthand for [`UnknownColumns::Reject`].
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_unknown_columns(UnknownColumns::Reject)
    }

    /// Check the option invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty `target_id`, a zero
    /// `row_page_size`, or a zero `col_page_size`.
    pub fn validate(&self) -> Result<()> {
        if self.target_id.trim().is_empty() {
            return Err(Error::invalid_config("targetId must not be empty"));
        }
        if self.row_page_size == 0 {
            return Err(Error::invalid_config("rowPageSize must be positive"));
        }
        if self.col_page_size == Some(0) {
            return Err(Error::invalid_config("colPageSize must be positive"));
        }
        Ok(())
    }

    /// Parse options from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::parse(format!("display options: {e}")))
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on malformed JSON.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::parse(format!("display options: {e}")))
    }

    /// Load options from a `.toml` or `.json` file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, [`Error::Parse`] if it
    /// is malformed, or [`Error::InvalidConfig`] for other extensions.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(Error::invalid_config(format!(
                "unsupported options file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}
