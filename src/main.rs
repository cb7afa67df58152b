//! recently CLI entry point
//!
//! Parses arguments, installs logging, runs the command and prints
//! user-friendly errors.

use anyhow::Result;
use clap::Parser;
use recently_cli::cli;
use recently_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let config = cli.build_config();
    config.init_tracing();

    match cli.execute_with_config(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
