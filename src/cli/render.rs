//! The batch render loop.
//!
//! Every document is rendered on its own: a failing document is reported and
//! counted, and the loop moves on. Output is only written for documents that
//! rendered without error.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::core::{BoilerplateError, user_friendly_error};
use crate::templating::Composer;
use crate::utils::{atomic_write, output_path};

/// What happened to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Printed,
    Skipped,
    Failed,
}

/// Renders a list of documents, or every template under the working
/// directory when the list is empty.
#[derive(Debug, Clone, Default)]
pub struct RenderCommand {
    pub files: Vec<String>,
    pub suffix: String,
    pub dry_run: bool,
}

impl RenderCommand {
    pub fn execute(self, composer: &Composer) -> Result<()> {
        let files = if self.files.is_empty() {
            let cwd = std::env::current_dir().context("Failed to read the working directory")?;
            println!("compiling *{} in all subdirectories of {}", self.suffix, cwd.display());
            discover(Path::new("."), &self.suffix)
        } else {
            self.files.clone()
        };

        let mut failed = 0;
        let mut written = 0;
        for file in &files {
            match self.render_one(composer, file) {
                Ok(Outcome::Written | Outcome::Printed) => written += 1,
                Ok(Outcome::Failed) => failed += 1,
                Ok(Outcome::Skipped) => {}
                Err(e) => {
                    user_friendly_error(e).display();
                    failed += 1;
                }
            }
        }

        tracing::info!("{} rendered, {} failed", written, failed);
        if failed > 0 {
            return Err(BoilerplateError::BatchFailed {
                failed,
                total: files.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Renders `input` and writes (or prints) its output.
    ///
    /// Render errors are reported here and turned into [`Outcome::Failed`];
    /// output I/O failures are returned and [`execute`](Self::execute)
    /// reports them the same way.
    pub fn render_one(&self, composer: &Composer, input: &str) -> Result<Outcome> {
        let output = match output_path(input) {
            Ok(output) => output,
            Err(err) => {
                println!("{} {}", "skipping".yellow(), err);
                return Ok(Outcome::Skipped);
            }
        };

        let rendered = composer.render_file(input);
        if let Some(error) = rendered.error {
            user_friendly_error(
                BoilerplateError::RenderFailed {
                    document: input.to_string(),
                    error,
                }
                .into(),
            )
            .display();
            return Ok(Outcome::Failed);
        }

        if self.dry_run {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.text.as_bytes()).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")?;
            return Ok(Outcome::Printed);
        }

        atomic_write(&output, rendered.text.as_bytes())
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!("{} -> {}", input, output.display());
        Ok(Outcome::Written)
    }
}

/// Files below `root` whose path ends with `suffix`, in walk order (sorted
/// by name within each directory). Hidden directories are not entered.
pub fn discover(root: &Path, suffix: &str) -> Vec<String> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| display_path(entry.path()))
        .filter(|path| path.ends_with(suffix))
        .collect()
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}

/// `/`-separated path without a leading `./`.
fn display_path(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    match text.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
