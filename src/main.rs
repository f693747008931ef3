mod cli;
mod error;
pub(crate) mod git;
mod io_utils;
mod logging;
pub(crate) mod report;
pub(crate) mod serde_helpers;
pub(crate) mod time_utils;
pub(crate) mod walk;

pub(crate) use error::{AppError, AppResult};

use clap::Parser;
use std::process::exit;
use tracing::error;

// Single-threaded so the local UTC offset can be read safely.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = cli::Cli::parse();
    logging::setup_logger(cli.verbosity.tracing_level_filter(), cli.use_ansi());
    if let Err(e) = cli.run().await {
        error!("{}", e);
        exit(1);
    }
}
