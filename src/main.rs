//! shelfwise - Browse a library catalog and its orders
//!
//! Thin binary over the `shelfwise` library: parses arguments, runs one
//! command and prints its JSON output.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shelfwise::cli::{self, Cli};

/// Sends log output to stderr so stdout stays machine-readable
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match cli::run(&cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
