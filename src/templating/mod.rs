//! Recursive document composition on top of Tera.
//!
//! A document is a Tera template that can pull other documents into itself.
//! Each include expands the target with its own [`RenderContext`], which
//! carries the positional arguments of that include, the variables the
//! document defines, a link to the including context, and the first error
//! seen below it.
//!
//! # Directives
//!
//! Documents call these functions (Tera functions take named arguments):
//!
//! | Function | Result |
//! |---|---|
//! | `inc(path, args=[..])` | expansion of another document |
//! | `arg(i)` / `args()` | positional argument `i` / the whole frame |
//! | `def(name, value)` | binds a variable in this document, yields `""` |
//! | `var(name)` | nearest binding along the include chain |
//! | `raw(path)` / `esc(path)` | file content, verbatim / HTML-escaped |
//! | `cat(values=[..])` / `to_lower(value)` | text helpers |
//! | `ls(pattern)` / `ls_dirs()` | sorted listings of the document's directory |
//! | `exists(path)`, `base_name(path)`, `no_ext(path)`, `dir()`, `path()` | path helpers |
//! | `cmd(name, args=[..])` | combined output of an external program |
//! | `echo(msg)` | logs `msg`, yields `""` |
//! | `publist(dir, template)` | one include of `template` per citation record |
//!
//! The Tera context of every document also holds `file`, `dir` and `args`.
//!
//! # Paths
//!
//! `./x` is relative to the directory of the current document; any other
//! reference is relative to the working directory. See [`path::resolve`].
//!
//! # Scoping
//!
//! Variables are scoped dynamically: `var` looks in the current document's
//! bindings, then its includer's, and so on up to the root. Arguments are not
//! inherited; a nested include only sees what was passed to it.
//!
//! # Example
//!
//! `index.html.t`:
//! ```text
//! {{ def(name="title", value="Home") }}{{ inc(path="./head.html", args=["en"]) }}
//! ```
//!
//! `head.html`:
//! ```text
//! <html lang="{{ arg(i=0) }}"><title>{{ var(name="title") }}</title>
//! ```

pub mod context;
pub mod error;
pub mod functions;
pub mod loader;
pub mod ops;
pub mod path;
pub mod renderer;


pub use context::RenderContext;
pub use error::{ComposeError, Rendered};
pub use renderer::{Composer, ComposerSettings};
