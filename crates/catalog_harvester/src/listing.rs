//! Directory-listing parsers.
//!
//! Every parser is a pure function from page text to an ordered sequence.
//! Tree walks use an explicit stack, so document order is preserved without
//! recursion or captured state.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html};

use crate::ListingRecord;

/// Anchor, date, time and size on one line of a `<pre>` index.
static PREFORMATTED_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<a\s+href="([^"]+)"[^>]*>([^<]+)</a>\s+(\d{2}-\w{3}-\d{4})\s+(\d{2}:\d{2})\s+([^\s<]+(?:\s+[^\s<]+)?)"#,
    )
    .expect("preformatted row pattern is valid")
});

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("invalid filter pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Optional filter: an empty pattern keeps everything.
struct NameFilter(Option<Regex>);

impl NameFilter {
    fn new(pattern: &str) -> Result<Self, ListingError> {
        if pattern.is_empty() {
            return Ok(Self(None));
        }
        Regex::new(pattern)
            .map(|re| Self(Some(re)))
            .map_err(|source| ListingError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    fn keeps(&self, candidate: &str) -> bool {
        self.0.as_ref().is_none_or(|re| re.is_match(candidate))
    }
}

/// Collect `href` targets of every anchor, in document order.
///
/// A page without anchors yields an empty list. The HTML tokenizer recovers
/// from any markup, so the only failure is an invalid `pattern`.
pub fn parse_links(markup: &str, pattern: &str) -> Result<Vec<String>, ListingError> {
    let filter = NameFilter::new(pattern)?;
    let document = Html::parse_document(markup);

    let links = elements_named(document.tree.root(), "a")
        .into_iter()
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| filter.keeps(href))
        .map(str::to_string)
        .collect();
    Ok(links)
}

/// Positional table rows: first cell holds the anchor, second the size,
/// third the modification time. Header rows have no anchor and are dropped.
pub fn parse_file_table(markup: &str, pattern: &str) -> Result<Vec<ListingRecord>, ListingError> {
    let filter = NameFilter::new(pattern)?;
    let document = Html::parse_document(markup);

    let mut records = Vec::new();
    for row in elements_named(document.tree.root(), "tr") {
        let mut record = ListingRecord::default();
        for (index, cell) in child_elements(row, "td").enumerate() {
            match index {
                0 => {
                    if let Some(href) = child_elements(cell, "a")
                        .filter_map(|anchor| anchor.value().attr("href"))
                        .last()
                    {
                        record.name = href.to_string();
                    }
                }
                1 => record.size = text_of(cell),
                2 => record.last_modified = text_of(cell),
                _ => break,
            }
        }
        if !record.name.is_empty() && filter.keeps(&record.name) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Loosely structured `<pre>` index: `<a href="f">f</a>  DD-Mon-YYYY HH:MM  SIZE`.
///
/// Anchors may wrap across lines, so line breaks are collapsed before matching.
/// The size token may carry one embedded space (`1.2 M`).
pub fn parse_preformatted_listing(
    text: &str,
    pattern: &str,
) -> Result<Vec<ListingRecord>, ListingError> {
    let filter = NameFilter::new(pattern)?;
    let flattened = text.replace("\r\n", " ").replace('\n', " ");

    let records = PREFORMATTED_ROW
        .captures_iter(&flattened)
        .filter(|caps| filter.keeps(&caps[1]))
        .map(|caps| ListingRecord {
            name: caps[1].to_string(),
            last_modified: format!("{} {}", &caps[3], &caps[4]),
            size: caps[5].trim().to_string(),
        })
        .collect();
    Ok(records)
}

/// Table rows where the filename sits in `<span class="name">`, the byte count
/// in the `data-size` attribute of the size cell, and an ISO-8601 timestamp in
/// `<time datetime>`.
pub fn parse_annotated_table(
    markup: &str,
    pattern: &str,
) -> Result<Vec<ListingRecord>, ListingError> {
    let filter = NameFilter::new(pattern)?;
    let document = Html::parse_document(markup);

    let mut records = Vec::new();
    for row in elements_named(document.tree.root(), "tr") {
        let mut record = ListingRecord::default();
        for cell in child_elements(row, "td") {
            if let Some(span) = elements_named(*cell, "span")
                .into_iter()
                .find(|span| span.value().attr("class") == Some("name"))
            {
                record.name = text_of(span);
            }

            let is_size_cell = cell
                .value()
                .attr("class")
                .is_some_and(|class| class.contains("size"));
            if is_size_cell {
                if let Some(bytes) = cell.value().attr("data-size") {
                    record.size = bytes.to_string();
                }
            }

            if let Some(stamp) = elements_named(*cell, "time")
                .into_iter()
                .find_map(|time| time.value().attr("datetime"))
            {
                record.last_modified = stamp.to_string();
            }
        }
        if !record.name.is_empty() && filter.keeps(&record.name) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Pre-order walk collecting every element with the given tag name.
fn elements_named<'a>(root: NodeRef<'a, Node>, name: &str) -> Vec<ElementRef<'a>> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(element) = ElementRef::wrap(node) {
            if element.value().name().eq_ignore_ascii_case(name) {
                found.push(element);
            }
        }
        // Reverse so the leftmost child is visited first.
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev());
    }
    found
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name().eq_ignore_ascii_case(name))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
