//! Filesystem helpers for the batch front end.
//!
//! - [`fs::output_path`] - output name of a document
//! - [`fs::atomic_write`] - write-then-rename output

pub mod fs;

pub use fs::{atomic_write, output_path};
