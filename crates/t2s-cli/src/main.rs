//! t2s entry point.
//!
//! ```bash
//! t2s check path/to/suite
//! t2s run --dry-run path/to/suite
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<ExitCode> {
    // RUST_LOG wins; otherwise the journal at info level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("t2s=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    t2s_cli::run(t2s_cli::Cli::parse())
}
