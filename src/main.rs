use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rust_rowstore::{Layout, PAGE_SIZE, Repl, TABLE_MAX_PAGES};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interactive shell over an in-memory, append-only table of users.
#[derive(Parser, Debug)]
#[command(name = "rust-rowstore", version, about)]
struct Args {
    /// Size of a table page in bytes
    #[arg(long, value_name = "BYTES", default_value_t = PAGE_SIZE)]
    page_size: usize,

    /// Maximum number of pages in the table
    #[arg(long, value_name = "N", default_value_t = TABLE_MAX_PAGES)]
    max_pages: usize,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let layout = Layout::new(args.page_size, args.max_pages).context("invalid table layout")?;
    info!(
        rows_per_page = layout.rows_per_page(),
        max_rows = layout.max_rows(),
        "starting"
    );

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    Repl::new(stdin, stdout, layout).run()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("rust_rowstore=debug")
        } else {
            EnvFilter::new("rust_rowstore=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
