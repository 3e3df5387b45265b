//! Core types shared by the front end.
//!
//! Holds the application-level error type and the colored error report
//! printed by the binary. Rendering errors proper live with the composition
//! engine in [`crate::templating`].

pub mod error;

pub use error::{BoilerplateError, ErrorContext, user_friendly_error};
