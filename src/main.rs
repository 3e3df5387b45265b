//! Boilerplate command-line entry point.
//!
//! Parses arguments, installs logging, runs the batch and turns a failure
//! into a colored report and a non-zero exit status.

use anyhow::Result;
use boilerplate::cli;
use boilerplate::core::user_friendly_error;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let config = cli.build_config();
    cli::init_logging(config.log_level.as_deref());

    match cli.execute_with_config(config) {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
