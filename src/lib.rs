//! Boilerplate - recursive document composition for static sites
//!
//! Boilerplate renders text documents (typically HTML) that include other
//! documents. Each document is a Tera template extended with a small set of
//! functions: `inc` pulls in another document with positional arguments,
//! `def`/`var` bind and read variables along the include chain, and helpers
//! read raw files, list directories, run programs and build publication
//! lists from citation exports.
//!
//! Rendering never stops at the first problem. A failed include leaves empty
//! text at its call site and every other part of the document still renders;
//! the first error of the whole include tree is reported for the document.
//!
//! # Architecture
//!
//! - [`templating`] - the composition engine: path resolution, loading,
//!   render contexts with dynamic scoping, the include driver and the
//!   functions documents can call
//! - [`publications`] - `.ciw` citation parsing and the `publist` function
//! - [`cli`] - batch front end: discovery, per-document render, output
//! - [`config`] - optional TOML configuration
//! - [`core`] - front-end errors and their terminal display
//! - [`utils`] - output naming and atomic writes
//!
//! # Example
//!
//! ```rust,no_run
//! use boilerplate::templating::Composer;
//!
//! let rendered = Composer::default().render_file("site/index.html.t");
//! if let Some(err) = &rendered.error {
//!     eprintln!("site/index.html.t: {err}");
//! }
//! print!("{}", rendered.text);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod publications;
pub mod templating;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
