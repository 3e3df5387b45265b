//! Test utilities for boilerplate
//!
//! Helpers shared by unit and integration tests: one-time logging setup and
//! a throwaway site directory to render documents from.
//!
//! # Example
//!
//! ```rust,no_run
//! use boilerplate::templating::Composer;
//! use boilerplate::test_utils::TestSite;
//!
//! let site = TestSite::new().unwrap();
//! let index = site.write("index.html.t", "Hello {{ inc(path=\"./name.txt\") }}").unwrap();
//! site.write("name.txt", "world").unwrap();
//!
//! let rendered = Composer::default().render_file(&index);
//! assert_eq!(rendered.text, "Hello world");
//! ```

pub mod site;

pub use site::TestSite;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
