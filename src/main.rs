//! vitrina CLI - windowed Arrow table previews
//!
//! Command-line interface for vitrina operations.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    vitrina::cli::run()
}
