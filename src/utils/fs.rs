//! Output file helpers.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::BoilerplateError;
use crate::templating::path::strip_extension;

/// Output file for `input`: the input path with its final extension removed.
///
/// `site/index.html.t` becomes `site/index.html`. An input without an
/// extension would be overwritten by its own output and is rejected with
/// [`BoilerplateError::OutputCollision`].
pub fn output_path(input: &str) -> Result<PathBuf, BoilerplateError> {
    let output = strip_extension(input);
    if output == input || output.is_empty() || output.ends_with('/') {
        return Err(BoilerplateError::OutputCollision {
            input: input.to_string(),
        });
    }
    Ok(PathBuf::from(output))
}

/// Writes `content` to `path` through a temporary file in the same directory,
/// so readers never see a half-written file.
///
/// Missing parent directories are created.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = temp_path_for(path);
    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to rename temp file to: {}", path.display()));
    }

    Ok(())
}

/// `dir/.name.tmp` next to `path`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}
