//! Raw content loading.
//!
//! The only place the composer touches file contents. Reads are whole-file
//! and synchronous; failures come back as [`ComposeError::Load`] so the caller
//! can record them on the active context instead of aborting.

use std::fs;

use super::error::ComposeError;

/// Reads the whole file at `path` as text.
///
/// Invalid UTF-8 sequences are replaced (with a warning) rather than rejected.
pub fn load(path: &str) -> Result<String, ComposeError> {
    let bytes = fs::read(path).map_err(|e| ComposeError::load(path, e))?;
    tracing::trace!("Loaded {} ({} bytes)", path, bytes.len());
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{} is not valid UTF-8, replacing invalid sequences", path);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
