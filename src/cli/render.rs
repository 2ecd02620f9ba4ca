//! The `render` command.

use std::path::PathBuf;

use clap::Args;

use super::Location;
use crate::{
    app,
    config::AppConfig,
    document::{Document, MemoryDocument},
    options::DisplayOptions,
    preview::{Preview, PreviewOutcome},
    source::FileTableSource,
};

#[derive(Debug, Args)]
pub(crate) struct RenderArgs {
    /// URL or path of the table; defaults to the configured preview path
    pub location: Option<String>,
    /// Container id to render into
    #[arg(long)]
    pub target: Option<String>,
    /// Columns to show, in order (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,
    /// Rows per page
    #[arg(long)]
    pub rows: Option<usize>,
    /// Zero-based row page
    #[arg(long)]
    pub row_page: Option<usize>,
    /// Columns per page
    #[arg(long)]
    pub cols: Option<usize>,
    /// Zero-based column page
    #[arg(long)]
    pub col_page: Option<usize>,
    /// Fail on column names the table does not have
    #[arg(long)]
    pub strict: bool,
    /// Display options file (.toml or .json, camelCase keys)
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// Write the fragment here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    /// Options file or config defaults, overridden by explicit flags.
    fn display_options(&self, config: &AppConfig) -> crate::Result<DisplayOptions> {
        let mut options = match &self.options {
            Some(path) => DisplayOptions::from_path(path)?,
            None => config.display_options(),
        };

        if let Some(target) = &self.target {
            options.target_id.clone_from(target);
        } else if options.target_id.is_empty() {
            options.target_id.clone_from(&config.target_id);
        }
        if let Some(columns) = &self.columns {
            options = options.with_visible_columns(columns.iter().map(|c| c.trim()));
        }
        if let Some(rows) = self.rows {
            options.row_page_size = rows;
        }
        if let Some(page) = self.row_page {
            options.row_page = page;
        }
        if let Some(cols) = self.cols {
            options.col_page_size = Some(cols);
        }
        if let Some(page) = self.col_page {
            options.col_page = page;
        }
        if self.strict {
            options = options.strict();
        }

        options.validate()?;
        Ok(options)
    }
}

/// Render one window of a table to stdout or `--output`.
pub(crate) async fn cmd_render(config: &AppConfig, args: RenderArgs) -> crate::Result<()> {
    let location = Location::resolve(config, args.location.as_deref())?;
    let options = args.display_options(config)?;
    let document = MemoryDocument::with_containers([options.target_id.clone()]);

    let outcome = match &location {
        Location::Remote(url) => app::init(config)?.load(&document, url, &options).await?,
        Location::Local(_) => {
            Preview::new(FileTableSource::new())
                .load(&document, &location.as_str(), &options)
                .await?
        }
    };

    let PreviewOutcome::Rendered { rows, columns } = outcome else {
        return Err(crate::Error::NotFound(format!(
            "container '{}' received no table",
            options.target_id
        )));
    };

    let html = document.inner_html(&options.target_id).unwrap_or_default();
    match &args.output {
        Some(path) => {
            std::fs::write(path, &html).map_err(|e| crate::Error::io(e, path))?;
            println!(
                "Rendered {} rows x {} columns to {}",
                rows,
                columns,
                path.display()
            );
        }
        None => println!("{}", html),
    }
    Ok(())
}
