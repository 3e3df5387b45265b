//! Auxiliary text, file and process operations available to documents.
//!
//! None of these touch the scope chain. File reads that fail are recorded on
//! the calling context like any other load failure; everything else either
//! succeeds or hands back an error for the binding layer to report.

use std::fs;
use std::process::Command;

use regex::Regex;
use tera::Value;

use super::context::RenderContext;
use super::error::ComposeError;
use super::{loader, path};

/// Verbatim content of `reference`, resolved against the calling document.
///
/// A load failure is recorded on `ctx` and yields an empty string.
pub fn raw(ctx: &RenderContext, reference: &str) -> String {
    let resolved = path::resolve(ctx.document(), reference);
    match loader::load(&resolved) {
        Ok(content) => content,
        Err(err) => {
            tracing::debug!("{}: raw load failed: {}", ctx.document(), err);
            ctx.record(err);
            String::new()
        }
    }
}

/// Like [`raw`], with HTML special characters escaped.
pub fn escaped(ctx: &RenderContext, reference: &str) -> String {
    tera::escape_html(&raw(ctx, reference))
}

/// Default textual form of a value: strings as-is, `null` as nothing, and
/// everything else in its JSON notation.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Concatenates the textual forms of `values`.
pub fn concat(values: &[Value]) -> String {
    values.iter().map(display).collect()
}

/// Lower-cased textual form of `value`.
pub fn lowercase(value: &Value) -> String {
    display(value).to_lowercase()
}

/// Entries of `dir` whose file name matches `pattern`, as `dir + name`,
/// sorted. Without a pattern every non-hidden entry is returned.
pub fn list_files(dir: &str, pattern: Option<&Regex>) -> Result<Vec<String>, ComposeError> {
    let mut files: Vec<String> = read_dir_names(dir)?
        .into_iter()
        .filter(|(name, _)| match pattern {
            Some(re) => re.is_match(name),
            None => !name.starts_with('.'),
        })
        .map(|(name, _)| format!("{dir}{name}"))
        .collect();
    files.sort();
    Ok(files)
}

/// Non-hidden subdirectories of `dir`, as `dir + name`, sorted.
pub fn list_dirs(dir: &str) -> Result<Vec<String>, ComposeError> {
    let mut dirs: Vec<String> = read_dir_names(dir)?
        .into_iter()
        .filter(|(name, is_dir)| *is_dir && !name.starts_with('.'))
        .map(|(name, _)| format!("{dir}{name}"))
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Whether `reference`, resolved against the calling document, exists.
pub fn exists(ctx: &RenderContext, reference: &str) -> bool {
    let resolved = path::resolve(ctx.document(), reference);
    !resolved.is_empty() && fs::metadata(&resolved).is_ok()
}

/// Directory elements of `dir` (as returned by [`path::dir_of`]).
///
/// The working directory itself has no elements.
pub fn path_elements(dir: &str) -> Vec<String> {
    let trimmed = dir.strip_suffix('/').unwrap_or(dir);
    if trimmed.is_empty() || trimmed == "." {
        return Vec::new();
    }
    trimmed.split('/').map(str::to_string).collect()
}

/// Runs `name` with `args` and returns its combined stdout and stderr.
///
/// Blocks until the program exits. No timeout is applied.
pub fn run_command(name: &str, args: &[String]) -> Result<String, ComposeError> {
    let program = which::which(name).map_err(|e| ComposeError::Command {
        name: name.to_string(),
        message: e.to_string(),
    })?;

    tracing::info!("{} {:?}", name, args);
    let output = Command::new(&program).args(args).output().map_err(|e| ComposeError::Command {
        name: name.to_string(),
        message: e.to_string(),
    })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if output.status.success() {
        Ok(combined)
    } else {
        Err(ComposeError::Command {
            name: name.to_string(),
            message: format!("{}\n{}", output.status, combined.trim_end()),
        })
    }
}

fn read_dir_names(dir: &str) -> Result<Vec<(String, bool)>, ComposeError> {
    let entries = fs::read_dir(dir).map_err(|e| ComposeError::load(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ComposeError::load(dir, e))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        names.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
    }
    Ok(names)
}
