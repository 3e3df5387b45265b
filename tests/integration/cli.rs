//! Command-line behavior: discovery, output naming, failures and flags.

use predicates::prelude::*;

use super::boilerplate;
use boilerplate::test_utils::TestSite;

#[test]
fn test_named_document_written_without_extension() {
    let site = TestSite::new().unwrap();
    site.write("site/index.html.t", "<nav>{{ inc(path=\"./nav.html\") }}</nav>").unwrap();
    site.write("site/nav.html", "home").unwrap();

    boilerplate(&site).arg("site/index.html.t").assert().success();

    assert_eq!(site.read("site/index.html").unwrap(), "<nav>home</nav>");
}

#[test]
fn test_no_arguments_walks_all_subdirectories() {
    let site = TestSite::new().unwrap();
    site.write("index.html.t", "top").unwrap();
    site.write("blog/2021/post.html.t", "post in {{ path() | join(sep=\"/\") }}").unwrap();
    site.write("blog/notes.txt", "not a template").unwrap();
    site.write(".hidden/secret.html.t", "hidden").unwrap();

    boilerplate(&site)
        .assert()
        .success()
        .stdout(predicate::str::contains("compiling *.t in all subdirectories of"));

    assert_eq!(site.read("index.html").unwrap(), "top");
    assert_eq!(site.read("blog/2021/post.html").unwrap(), "post in blog/2021");
    assert!(!site.exists("blog/notes"));
    assert!(!site.exists(".hidden/secret.html"));
}

#[test]
fn test_document_without_extension_is_skipped() {
    let site = TestSite::new().unwrap();
    site.write("README", "{{ inc(path=\"./missing\") }}").unwrap();

    boilerplate(&site)
        .arg("README")
        .assert()
        .success()
        .stdout(predicate::str::contains("README: output name equals input name"));

    assert_eq!(site.read("README").unwrap(), "{{ inc(path=\"./missing\") }}");
}

#[test]
fn test_failure_reported_and_batch_continues() {
    let site = TestSite::new().unwrap();
    site.write("a.html.t", "A {{ inc(path=\"./gone.html\") }}").unwrap();
    site.write("b.html.t", "B").unwrap();

    boilerplate(&site)
        .args(["a.html.t", "b.html.t"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("a.html.t"))
        .stderr(predicate::str::contains("gone.html"))
        .stderr(predicate::str::contains("1 of 2 documents failed"));

    assert!(!site.exists("a.html"), "failed documents must not be written");
    assert_eq!(site.read("b.html").unwrap(), "B");
}

#[test]
fn test_dry_run_prints_instead_of_writing() {
    let site = TestSite::new().unwrap();
    site.write("page.html.t", "{{ to_lower(value=\"DRY\") }}").unwrap();

    boilerplate(&site)
        .args(["--dry-run", "page.html.t"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry"));

    assert!(!site.exists("page.html"));
}

#[test]
fn test_suffix_flag_changes_discovery() {
    let site = TestSite::new().unwrap();
    site.write("a.html.tmpl", "tmpl").unwrap();
    site.write("b.html.t", "t").unwrap();

    boilerplate(&site)
        .args(["--suffix", ".tmpl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compiling *.tmpl"));

    assert_eq!(site.read("a.html").unwrap(), "tmpl");
    assert!(!site.exists("b.html"));
}

#[test]
fn test_max_depth_flag_stops_cycles() {
    let site = TestSite::new().unwrap();
    site.write("loop.html.t", "x{{ inc(path=\"./loop.html.t\") }}").unwrap();

    boilerplate(&site)
        .args(["--max-depth", "3", "loop.html.t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("depth limit of 3 exceeded"));

    assert!(!site.exists("loop.html"));
}

#[test]
fn test_config_file_sets_max_depth() {
    let site = TestSite::new().unwrap();
    site.write("conf/boilerplate.toml", "max_depth = 2\n").unwrap();
    site.write("loop.html.t", "{{ inc(path=\"./loop.html.t\") }}").unwrap();

    boilerplate(&site)
        .args(["--config", "conf/boilerplate.toml", "loop.html.t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("depth limit of 2 exceeded"));
}

#[test]
fn test_invalid_config_is_reported() {
    let site = TestSite::new().unwrap();
    site.write("bad.toml", "max_depth = \"deep\"\n").unwrap();
    site.write("a.html.t", "a").unwrap();

    boilerplate(&site)
        .args(["--config", "bad.toml", "a.html.t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration in bad.toml"));

    assert!(!site.exists("a.html"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let site = TestSite::new().unwrap();
    boilerplate(&site).args(["-v", "-q"]).assert().failure();
}
