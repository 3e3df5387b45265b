//! Publication lists rendered through the binary.

use super::boilerplate;
use boilerplate::test_utils::TestSite;

const EXPORT: &str = "FN Clarivate Analytics Web of Science
VR 1.0
PT J
AF Doe, Jane
   Roe, Richard
TI Older result
JI J. Magn.
PD MAY
PY 2019
DI 10.1000/old
ER

PT J
AF Doe, Jane
TI Newer result
JI Phys. Rev.
PD JAN
PY 2021
DI 10.1000/new
ER

EF
";

#[test]
fn test_publist_uses_configured_template() {
    let site = TestSite::new().unwrap();
    site.write("pubs/doe.ciw", EXPORT).unwrap();
    site.write(
        "templates/pub.html",
        "<li><a href=\"{{ arg(i=4) }}\">{{ arg(i=0) }}</a> {{ arg(i=1) | join(sep=\", \") }} ({{ arg(i=3) }})</li>\n",
    )
    .unwrap();
    site.write("config.toml", "publication_template = \"templates/pub.html\"\n").unwrap();
    site.write("papers.html.t", "<ul>\n{{ publist(dir=\"pubs\") }}</ul>").unwrap();

    boilerplate(&site).args(["--config", "config.toml", "papers.html.t"]).assert().success();

    assert_eq!(
        site.read("papers.html").unwrap(),
        "<ul>\n\
         <li><a href=\"http://doi.org/10.1000/new\">Newer result</a> Doe, Jane (JAN 2021)</li>\n\
         <li><a href=\"http://doi.org/10.1000/old\">Older result</a> Doe, Jane, Roe, Richard (MAY 2019)</li>\n\
         </ul>"
    );
}

#[test]
fn test_publist_missing_directory_fails_document() {
    let site = TestSite::new().unwrap();
    site.write("publication", "{{ arg(i=0) }}").unwrap();
    site.write("papers.html.t", "{{ publist(dir=\"./nowhere\") }}").unwrap();

    boilerplate(&site).arg("papers.html.t").assert().failure();
    assert!(!site.exists("papers.html"));
}
