//! vitrina CLI - windowed Arrow table previews
//!
//! Command-line interface for rendering and inspecting Arrow IPC tables.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

use crate::{
    app,
    config::AppConfig,
    source::{FileTableSource, TableSource},
    table::ColumnarTable,
};

mod inspect;
mod render;

/// vitrina - render a window of an Arrow IPC table as HTML
#[derive(Parser)]
#[command(name = "vitrina")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file (base_url, target_id, row_page_size, ...)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one page of a table as an HTML fragment
    Render(render::RenderArgs),
    /// List the column names of a table
    Columns {
        /// URL or path of the table; defaults to the configured preview path
        location: Option<String>,
    },
    /// Show row and column page counts
    Pages {
        /// URL or path of the table; defaults to the configured preview path
        location: Option<String>,
        /// Rows per page
        #[arg(long)]
        rows: Option<usize>,
        /// Columns per page
        #[arg(long)]
        cols: Option<usize>,
    },
}

/// Run the vitrina CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = AppConfig::load(cli.config.as_deref()).and_then(move |config| {
        let level = if cli.verbose {
            log::LevelFilter::Debug
        } else {
            config.log_level_filter()?
        };
        app::init_logging(level);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| crate::Error::Io { path: None, source: e })?;

        runtime.block_on(async move {
            match cli.command {
                Commands::Render(args) => render::cmd_render(&config, args).await,
                Commands::Columns { location } => {
                    inspect::cmd_columns(&config, location.as_deref()).await
                }
                Commands::Pages {
                    location,
                    rows,
                    cols,
                } => inspect::cmd_pages(&config, location.as_deref(), rows, cols).await,
            }
        })
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Location {
    /// Fetched over HTTP, relative to the configured base URL if not absolute.
    Remote(String),
    /// Read from the local filesystem.
    Local(PathBuf),
}

impl Location {
    /// Classify an explicit location, or fall back to the configured preview
    /// path on the configured server.
    pub(crate) fn resolve(config: &AppConfig, location: Option<&str>) -> crate::Result<Self> {
        match location {
            Some(loc) if loc.starts_with("http://") || loc.starts_with("https://") => {
                Ok(Self::Remote(loc.to_string()))
            }
            Some(loc) => Ok(Self::Local(PathBuf::from(loc))),
            None if config.base_url.is_some() => Ok(Self::Remote(config.preview_path.clone())),
            None => Err(crate::Error::invalid_config(
                "no location given and no base_url configured",
            )),
        }
    }

    pub(crate) fn as_str(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Self::Remote(url) => url.as_str().into(),
            Self::Local(path) => path.to_string_lossy(),
        }
    }
}

/// Fetch and decode the table at `location`.
pub(crate) async fn load_table(
    config: &AppConfig,
    location: &Location,
) -> crate::Result<ColumnarTable> {
    match location {
        Location::Remote(url) => app::http_source(config)?.fetch(url).await,
        Location::Local(_) => FileTableSource::new().fetch(&location.as_str()).await,
    }
}
