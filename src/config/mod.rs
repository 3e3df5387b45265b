//! Configuration for batch runs.
//!
//! Settings come from an optional TOML file (see [`GlobalConfig`]) and can be
//! overridden per run on the command line.
//!
//! # Location
//!
//! 1. `--config <path>`
//! 2. `$BOILERPLATE_CONFIG`
//! 3. `~/.boilerplate/config.toml`
//!
//! # Example
//!
//! ```toml
//! suffix = ".t"
//! max_depth = 32
//! publication_template = "publication"
//! ```

pub mod global;

pub use global::GlobalConfig;
