//! Include chains rendered through the binary.

use predicates::prelude::*;

use super::boilerplate;
use boilerplate::test_utils::TestSite;

fn write_layout(site: &TestSite) {
    site.write(
        "pages/about.html.t",
        "{{ def(name=\"title\", value=\"About\") }}{{ inc(path=\"./../layout/page.html\", args=[\"en\", \"About us\"]) }}",
    )
    .unwrap();
    site.write(
        "layout/page.html",
        "<html lang=\"{{ arg(i=0) }}\"><title>{{ var(name=\"title\") }}</title>{{ inc(path=\"./body.html\") }}</html>",
    )
    .unwrap();
    site.write("layout/body.html", "<h1>{{ var(name=\"title\") }}</h1><p>[{{ arg(i=1) }}]</p>").unwrap();
}

#[test]
fn test_layout_with_scoped_variables_and_arguments() {
    let site = TestSite::new().unwrap();
    write_layout(&site);

    boilerplate(&site).arg("pages/about.html.t").assert().success();

    assert_eq!(
        site.read("pages/about.html").unwrap(),
        "<html lang=\"en\"><title>About</title><h1>About</h1><p>[]</p></html>"
    );
}

#[test]
fn test_missing_argument_is_only_a_warning() {
    let site = TestSite::new().unwrap();
    write_layout(&site);

    boilerplate(&site)
        .arg("pages/about.html.t")
        .assert()
        .success()
        .stderr(predicate::str::contains("argument 1 not provided"));
}

#[test]
fn test_deep_failure_reaches_top_level() {
    let site = TestSite::new().unwrap();
    site.write("a.html.t", "{{ inc(path=\"./b.html\") }}").unwrap();
    site.write("b.html", "{{ inc(path=\"./c.html\") }}").unwrap();
    site.write("c.html", "{{ raw(path=\"./data/missing.csv\") }}").unwrap();

    boilerplate(&site)
        .arg("a.html.t")
        .assert()
        .failure()
        .stderr(predicate::str::contains("data/missing.csv"));
}

#[test]
fn test_escaped_source_listing() {
    let site = TestSite::new().unwrap();
    site.write("code/main.go", "if a < b && b > c {}").unwrap();
    site.write("listing.html.t", "<pre>{{ esc(path=\"./code/main.go\") }}</pre>").unwrap();

    boilerplate(&site).arg("listing.html.t").assert().success();

    assert_eq!(
        site.read("listing.html").unwrap(),
        "<pre>if a &lt; b &amp;&amp; b &gt; c {}</pre>"
    );
}

#[test]
fn test_directory_index_from_listing() {
    let site = TestSite::new().unwrap();
    site.write("gallery/b.jpg", "").unwrap();
    site.write("gallery/a.jpg", "").unwrap();
    site.write(
        "gallery/index.html.t",
        "{% for f in ls(pattern=\"\\.jpg$\") %}<img src=\"{{ base_name(path=f) }}\">{% endfor %}",
    )
    .unwrap();

    boilerplate(&site).arg("gallery/index.html.t").assert().success();

    assert_eq!(
        site.read("gallery/index.html").unwrap(),
        "<img src=\"a.jpg\"><img src=\"b.jpg\">"
    );
}
