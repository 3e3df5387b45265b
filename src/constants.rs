//! Global constants used throughout the boilerplate codebase.
//!
//! Defaults that the configuration file can override live next to the
//! fixed markers of the document format, so the two are easy to find.

/// Prefix marking an include reference as relative to the including document.
pub const RELATIVE_MARKER: &str = "./";

/// Suffix of template files picked up when walking a directory tree.
pub const DEFAULT_SUFFIX: &str = ".t";

/// Default include nesting limit.
///
/// Include cycles are otherwise unbounded; the limit turns them into a
/// recorded error well before the stack runs out.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Template included once per record by `publist` unless the document names one.
pub const DEFAULT_PUBLICATION_TEMPLATE: &str = "publication";

/// Extension of citation files read by `publist`.
pub const CITATION_EXTENSION: &str = "ciw";

/// Prefix turning a bare DOI into a resolvable link.
pub const DOI_URL_PREFIX: &str = "http://doi.org/";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "BOILERPLATE_CONFIG";
