use catalog_harvester::{
    parse_annotated_table, parse_file_table, parse_links, parse_preformatted_listing,
    ListingError, ListingRecord,
};
use pretty_assertions::assert_eq;

const TABLE: &str = include_str!("fixtures/table_listing.html");
const PREFORMATTED: &str = include_str!("fixtures/preformatted_listing.html");
const ANNOTATED: &str = include_str!("fixtures/annotated_listing.html");
const ARTIFACTS: &str = r"\.(zip|tar\.gz)$";

fn record(name: &str, size: &str, last_modified: &str) -> ListingRecord {
    ListingRecord {
        name: name.to_string(),
        size: size.to_string(),
        last_modified: last_modified.to_string(),
    }
}

#[test]
fn links_come_back_in_document_order() {
    let html = r#"<ul><li><a href="../">up</a></li><li><a href="./17/">17</a></li>
        <li><a name="anchor-only">x</a></li><li><a href="8/">8</a></li></ul>"#;

    assert_eq!(parse_links(html, "").unwrap(), vec!["../", "./17/", "8/"]);
    assert_eq!(
        parse_links(html, r"^(?:\./)?(\d+(?:\.\d+)*)/$").unwrap(),
        vec!["./17/", "8/"]
    );
}

#[test]
fn pattern_may_match_part_of_the_target() {
    let html = r#"<a href="jdk/">jdk</a><a href="jre/">jre</a>"#;
    assert_eq!(parse_links(html, "dk").unwrap(), vec!["jdk/"]);
}

#[test]
fn page_without_anchors_is_empty_not_an_error() {
    assert!(parse_links("<p>nothing to see</p>", "").unwrap().is_empty());
    assert!(parse_links("", "").unwrap().is_empty());
    assert!(parse_links("<<<>>> not html at all", ".*").unwrap().is_empty());
}

#[test]
fn invalid_pattern_is_reported() {
    let err = parse_links("<a href='x'>x</a>", "(unclosed").unwrap_err();
    assert!(matches!(err, ListingError::Pattern { .. }));
}

#[test]
fn file_table_reads_cells_by_position() {
    let records = parse_file_table(TABLE, ARTIFACTS).unwrap();
    assert_eq!(
        records,
        vec![
            record("openjdk-20.0.1_linux-x64_bin.tar.gz", "197216712", "2023-04-18 20:30"),
            record("openjdk-20.0.1_windows-x64_bin.zip", "199543211", "2023-04-18 20:31"),
            record(
                "openjdk-20.0.1_solaris-sparcv9_bin.tar.gz",
                "180000000",
                "2023-04-18 20:32"
            ),
        ]
    );
}

#[test]
fn file_table_without_pattern_keeps_parent_row_but_not_header() {
    let records = parse_file_table(TABLE, "").unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0], record("../", "-", "-"));
}

#[test]
fn preformatted_listing_handles_wrapped_anchors_and_spaced_sizes() {
    let records = parse_preformatted_listing(PREFORMATTED, ARTIFACTS).unwrap();
    assert_eq!(
        records,
        vec![
            record(
                "openjdk-11.0.1_linux-x64_bin.tar.gz",
                "187599951",
                "16-Oct-2018 18:10"
            ),
            record("openjdk-11.0.1_windows-x64_bin.zip", "179 M", "16-Oct-2018 18:11"),
            record("openjdk-11.0.1_src.zip", "98 M", "16-Oct-2018 18:12"),
        ]
    );
}

#[test]
fn preformatted_listing_without_rows_is_empty() {
    let records = parse_preformatted_listing("<pre><a href=\"../\">../</a>\n</pre>", "").unwrap();
    assert!(records.is_empty());
}

#[test]
fn annotated_table_reads_attributes() {
    let records = parse_annotated_table(ANNOTATED, ARTIFACTS).unwrap();
    assert_eq!(
        records,
        vec![
            record("openjdk-8u43-linux-x64.tar.gz", "174287938", "2020-01-14T08:21:44Z"),
            record(
                "openjdk-8u41-b04-windows-i586-14_jan_2020.zip",
                "1536",
                "2020-01-14T08:25:01+08:00"
            ),
            record(
                "openjdk-8u41-src-b04-14_jan_2020.zip",
                "60000000",
                "2020-01-14T08:26:00Z"
            ),
        ]
    );
}

#[test]
fn annotated_table_ignores_rows_without_name_span() {
    let html = r#"<table><tr><td class="size" data-size="10">10 B</td></tr></table>"#;
    assert!(parse_annotated_table(html, "").unwrap().is_empty());
}
