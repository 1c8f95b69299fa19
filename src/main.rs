//! autoref - run the tailwind-auto-reference transform from the command line
//!
//! autoref provides:
//! - Single-file transforms (file or stdin)
//! - Project checks reporting which files would receive `@reference` lines
//! - Effective configuration dumps
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use autoref::cli;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "AUTOREF_LOG";

fn init_tracing(verbose: bool, quiet: bool) {
    let fallback = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // stdout carries results; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    cli::run(cli)
}
