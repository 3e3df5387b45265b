//! Integration test suite for boilerplate
//!
//! End-to-end tests that drive the compiled binary against temporary sites.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: argument handling, discovery, output files and exit status
//! - **composition**: include chains, scoping and error reporting end to end
//! - **publications**: publication lists from `.ciw` exports

use assert_cmd::Command;
use boilerplate::test_utils::TestSite;

mod cli;
mod composition;
mod publications;

/// The binary, run from the site root with no user configuration.
fn boilerplate(site: &TestSite) -> Command {
    let mut cmd = Command::cargo_bin("boilerplate").unwrap();
    cmd.current_dir(site.root())
        .env("BOILERPLATE_CONFIG", site.path(".no-config.toml"))
        .env_remove("RUST_LOG");
    cmd
}
