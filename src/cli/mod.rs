//! Command-line interface.
//!
//! ```bash
//! boilerplate                        # every *.t below the working directory
//! boilerplate site/index.html.t      # just this document -> site/index.html
//! boilerplate --dry-run page.t       # print instead of writing
//! boilerplate -v --max-depth 8       # debug logging, shallower include limit
//! ```
//!
//! Options on the command line override the configuration file
//! (see [`crate::config`]).

pub mod render;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;
use crate::templating::Composer;
use render::RenderCommand;

/// Runtime settings derived from the flags, kept apart from parsing so they
/// can be built and checked in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter to install; `None` defers to `RUST_LOG` (or `info`).
    pub log_level: Option<String>,
    /// Configuration file named with `--config`.
    pub config_path: Option<String>,
}

/// Recursive document composer.
///
/// Renders documents whose includes pull in other documents. Each input is
/// written next to itself with its final extension removed, so
/// `index.html.t` becomes `index.html`.
#[derive(Parser, Debug)]
#[command(name = "boilerplate", version, about, long_about = None)]
pub struct Cli {
    /// Documents to render. Without any, every file ending in the template
    /// suffix below the working directory is rendered.
    #[arg(value_name = "FILES")]
    files: Vec<String>,

    /// Enable debug output, including a trace of every include.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors.
    #[arg(short, long)]
    quiet: bool,

    /// Path to the configuration file (default: ~/.boilerplate/config.toml).
    #[arg(short, long)]
    config: Option<String>,

    /// Template suffix used when discovering documents.
    #[arg(long)]
    suffix: Option<String>,

    /// Deepest include nesting allowed.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Render and print to stdout without writing any file.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Translates the verbosity flags and config path into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Runs the batch.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Runs the batch with explicit runtime settings.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let mut settings = GlobalConfig::load_with_optional(config.config_path.map(PathBuf::from))?;
        if let Some(suffix) = self.suffix {
            settings.suffix = suffix;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        tracing::debug!("Settings: {:?}", settings);

        let composer = Composer::new(settings.composer_settings());
        RenderCommand {
            files: self.files,
            suffix: settings.suffix,
            dry_run: self.dry_run,
        }
        .execute(&composer)
    }
}

/// Installs the stderr log subscriber.
///
/// `level` wins over `RUST_LOG`; with neither, `info` is used.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
