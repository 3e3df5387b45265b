//! Error handling for the batch front end.
//!
//! Composition itself never fails outright; it reports a
//! [`ComposeError`](crate::templating::ComposeError) next to the text it
//! produced. This module covers what happens around it: configuration,
//! output files, and the overall outcome of a batch run.
//!
//! - [`BoilerplateError`] - typed failures of the front end
//! - [`ErrorContext`] - wraps an error with details and a suggestion for the terminal
//! - [`user_friendly_error`] - turns any `anyhow::Error` into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use boilerplate::core::{BoilerplateError, ErrorContext};
//!
//! let context = ErrorContext::new(BoilerplateError::ConfigError {
//!     path: "~/.boilerplate/config.toml".to_string(),
//!     reason: "expected a table".to_string(),
//! })
//! .with_suggestion("Fix the TOML syntax or remove the file to use defaults");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::ComposeError;

/// Failures of the batch front end.
#[derive(Error, Debug)]
pub enum BoilerplateError {
    /// A document rendered with an error; its output was not written.
    #[error("{document}: {error}")]
    RenderFailed {
        document: String,
        error: ComposeError,
    },

    /// Some documents of a batch failed.
    #[error("{failed} of {total} documents failed to render")]
    BatchFailed {
        failed: usize,
        total: usize,
    },

    /// The output name of a document would overwrite the document itself.
    #[error("{input}: output name equals input name")]
    OutputCollision {
        input: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("Invalid configuration in {path}: {reason}")]
    ConfigError {
        path: String,
        reason: String,
    },

    #[error("{message}")]
    Other {
        message: String,
    },
}

/// An error plus the extra lines shown to the user.
#[derive(Debug)]
pub struct ErrorContext {
    pub error: BoilerplateError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: BoilerplateError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Adds an actionable hint, printed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Adds background on the failure, printed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Prints the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Converts any error into an [`ErrorContext`] with a suggestion where one
/// is known.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<BoilerplateError>() {
        Ok(known) => return create_error_context(known),
        Err(other) => other,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(BoilerplateError::Other {
                    message: chain_message(&error),
                })
                .with_suggestion("Check the permissions of the output directory and files");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(BoilerplateError::Other {
                    message: chain_message(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(BoilerplateError::ConfigError {
            path: "config.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of the configuration file");
    }

    ErrorContext::new(BoilerplateError::Other {
        message: chain_message(&error),
    })
}

/// The error message followed by its numbered causes.
fn chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }
    message
}

fn create_error_context(error: BoilerplateError) -> ErrorContext {
    match &error {
        BoilerplateError::RenderFailed {
            error: compose,
            ..
        } => {
            let suggestion = match compose {
                ComposeError::Load {
                    ..
                } => "Check the include path; `./` paths are relative to the including document, others to the working directory",
                ComposeError::Expansion {
                    ..
                } => "Check the template syntax and the names and arguments of the functions it calls",
                ComposeError::DepthExceeded {
                    ..
                } => "Look for a document that includes itself, directly or through other documents",
                ComposeError::Citation {
                    ..
                } => "Check that the publication directory exists and its .ciw files hold RIS records",
                ComposeError::Command {
                    ..
                } => "Check that the program is installed and on PATH",
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        BoilerplateError::BatchFailed {
            ..
        } => ErrorContext::new(error)
            .with_details("Documents that failed were not written; the errors are listed above"),
        BoilerplateError::OutputCollision {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Give the document an extension (for example `.t`) that is stripped on output"),
        BoilerplateError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the configuration file or remove it to use the defaults"),
        BoilerplateError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
