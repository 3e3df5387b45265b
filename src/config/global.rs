//! User-wide configuration file.
//!
//! The file is optional; every field falls back to a built-in default, and a
//! missing file behaves like an empty one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_ENV_VAR, DEFAULT_MAX_DEPTH, DEFAULT_PUBLICATION_TEMPLATE, DEFAULT_SUFFIX,
};
use crate::core::BoilerplateError;
use crate::templating::ComposerSettings;

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_publication_template() -> String {
    DEFAULT_PUBLICATION_TEMPLATE.to_string()
}

/// Settings read from `~/.boilerplate/config.toml`.
///
/// ```toml
/// suffix = ".tmpl"
/// max_depth = 16
/// publication_template = "templates/publication.html"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Suffix of the files rendered when no files are named on the command line.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Deepest include nesting allowed.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Per-record template used by `publist` when a document names none.
    #[serde(default = "default_publication_template")]
    pub publication_template: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            max_depth: default_max_depth(),
            publication_template: default_publication_template(),
        }
    }
}

impl GlobalConfig {
    /// Loads the configuration from the default location, or the defaults if
    /// there is no file there.
    pub fn load() -> Result<Self> {
        Self::load_with_optional(None)
    }

    /// Loads from `path` when given (with `~` and `$VARS` expanded), else
    /// from [`default_path`](Self::default_path).
    ///
    /// An explicitly named file must exist; the default file may be absent.
    pub fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                let expanded = expand(&path)?;
                Self::load_from(&expanded)
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    tracing::debug!("No configuration at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| BoilerplateError::ConfigError {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `$BOILERPLATE_CONFIG` if set, else `~/.boilerplate/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        path_from_env(std::env::var_os(CONFIG_ENV_VAR))
    }

    /// The composer settings this configuration describes.
    pub fn composer_settings(&self) -> ComposerSettings {
        ComposerSettings {
            max_depth: self.max_depth,
            publication_template: self.publication_template.clone(),
        }
    }
}

fn path_from_env(value: Option<OsString>) -> Result<PathBuf> {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        return expand(Path::new(&value));
    }

    Ok(dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
        .join(".boilerplate")
        .join("config.toml"))
}

fn expand(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand configuration path {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
