//! Error kinds recorded while composing documents.
//!
//! Composition never unwinds on failure. Every include returns its best-effort
//! text, and the first failure seen in a subtree is kept on the nearest
//! [`RenderContext`](super::RenderContext) and bubbled toward the root. The
//! types here describe those failures; [`Rendered`] is the `{text, error}` pair
//! handed back by every render call.

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// A failure recorded on a render context.
///
/// Cloneable so that a parent can adopt a child's error without taking it
/// away from the child.
#[derive(Debug, Clone, Error)]
pub enum ComposeError {
    /// A referenced file could not be read (missing, permissions, a directory).
    #[error("{path}: {source}")]
    Load {
        /// Resolved path that failed to load
        path: String,
        /// Underlying I/O failure
        #[source]
        source: Arc<io::Error>,
    },

    /// The expansion library rejected a document (syntax or evaluation fault).
    #[error("{document}: {message}")]
    Expansion {
        /// Document being expanded
        document: String,
        /// Flattened Tera error chain
        message: String,
    },

    /// The include chain grew deeper than the configured limit.
    #[error("{document}: include depth limit of {limit} exceeded (include cycle?)")]
    DepthExceeded {
        /// Reference that would have exceeded the limit
        document: String,
        /// Configured maximum depth
        limit: usize,
    },

    /// A citation directory or file could not be turned into publication records.
    #[error("{path}: {message}")]
    Citation {
        /// Directory or file involved
        path: String,
        /// What went wrong
        message: String,
    },

    /// An external command failed. Logged only, never recorded on a context.
    #[error("command '{name}' failed: {message}")]
    Command {
        /// Program name as written in the document
        name: String,
        /// Exit status or spawn failure plus captured output
        message: String,
    },
}

impl ComposeError {
    /// Builds a [`ComposeError::Load`] from an I/O failure.
    pub fn load(path: impl Into<String>, source: io::Error) -> Self {
        Self::Load {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Builds a [`ComposeError::Expansion`] from a Tera error, flattening its
    /// source chain into a single line.
    pub fn expansion(document: impl Into<String>, error: &tera::Error) -> Self {
        Self::Expansion {
            document: document.into(),
            message: format_tera_error(error),
        }
    }

    /// Short label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Load {
                ..
            } => "load",
            Self::Expansion {
                ..
            } => "expansion",
            Self::DepthExceeded {
                ..
            } => "depth",
            Self::Citation {
                ..
            } => "citation",
            Self::Command {
                ..
            } => "command",
        }
    }
}

/// Output of one render call: the text produced plus the first error seen
/// anywhere in its subtree.
///
/// The text is kept even when `error` is set; failing includes degrade to
/// empty or partial text at the failure site.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// Produced text, possibly partial
    pub text: String,
    /// First failure in the subtree, if any
    pub error: Option<ComposeError>,
}

impl Rendered {
    /// Whether the render completed without any recorded error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, dropping the partial text on failure.
    pub fn into_result(self) -> Result<String, ComposeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.text),
        }
    }
}

/// Flattens a Tera error and its source chain into one readable message.
///
/// Tera nests the interesting part (for example the message returned by a
/// function) a few levels down, behind generic "Failed to render" wrappers.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = Vec::new();
    let mut current: Option<&dyn Error> = Some(error);
    while let Some(err) = current {
        let msg = err.to_string().trim().to_string();
        if !msg.is_empty() && !messages.contains(&msg) {
            messages.push(msg);
        }
        current = err.source();
    }

    if messages.is_empty() {
        "template error".to_string()
    } else {
        messages.join(": ")
    }
}
