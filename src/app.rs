//! One-shot application initialization.

use std::sync::OnceLock;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(feature = "http")]
use crate::{config::AppConfig, error::Result, preview::Preview, source::HttpTableSource};

static LOGGER: OnceLock<bool> = OnceLock::new();

/// Install the stderr logger at `level`.
///
/// Only the first call has an effect. Returns whether that call managed to
/// install the logger; later calls return the same answer.
pub fn init_logging(level: LevelFilter) -> bool {
    *LOGGER.get_or_init(|| {
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
        .is_ok()
    })
}

/// Set up logging and build the preview for `config`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) for invalid
/// settings or if the HTTP client cannot be built.
#[cfg(feature = "http")]
pub fn init(config: &AppConfig) -> Result<Preview<HttpTableSource>> {
    config.validate()?;
    init_logging(config.log_level_filter()?);
    let source = http_source(config)?;

    log::info!(
        "preview of '{}' into #{} ready",
        config.preview_path,
        config.target_id
    );
    Ok(Preview::new(source))
}

/// HTTP source with the configured base URL and timeout.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the HTTP
/// client cannot be built.
#[cfg(feature = "http")]
pub fn http_source(config: &AppConfig) -> Result<HttpTableSource> {
    let source = match config.timeout_secs {
        Some(secs) => HttpTableSource::with_timeout(secs)?,
        None => HttpTableSource::new()?,
    };
    Ok(match &config.base_url {
        Some(base) => source.with_base_url(base.clone()),
        None => source,
    })
}
