//! HTML link extraction
//!
//! This module turns a fetched document into the set of in-scope article
//! links it contains.
//!
//! # Link Extraction Rules
//!
//! **Include:**
//! - `<a href="...">` anywhere in the document, resolved against the page URL
//!
//! **Exclude:**
//! - Empty and fragment-only hrefs
//! - `javascript:`, `mailto:`, `tel:` links and data URIs
//! - Links to another host or port
//! - Links whose path does not start with the configured prefix
//!
//! html5ever recovers from malformed markup, so a broken page yields fewer
//! links rather than an error.

use crate::url::{is_in_scope, resolve_href};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Yields the set of candidate URLs reachable from a document
pub trait LinkExtractor: Send + Sync {
    /// Extracts absolute in-scope URLs from `document`, found at `base_url`
    fn extract(&self, document: &str, base_url: &Url) -> HashSet<String>;
}

/// `LinkExtractor` that follows anchors matching a path prefix
#[derive(Debug, Clone)]
pub struct AnchorExtractor {
    path_prefix: String,
    strip_fragments: bool,
}

impl AnchorExtractor {
    /// Creates an extractor for anchors under `path_prefix` (e.g. `/wiki/`)
    pub fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            strip_fragments: true,
        }
    }

    /// Keeps or drops `#fragment` on extracted links
    pub fn strip_fragments(mut self, strip: bool) -> Self {
        self.strip_fragments = strip;
        self
    }

    /// The path prefix links must match
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }
}

impl LinkExtractor for AnchorExtractor {
    fn extract(&self, document: &str, base_url: &Url) -> HashSet<String> {
        extract_links(document, base_url, &self.path_prefix, self.strip_fragments)
    }
}

/// Extracts in-scope links from an HTML document
///
/// # Example
///
/// ```
/// use url::Url;
/// use wiki_ripple::crawler::extract_links;
///
/// let html = r#"<a href="/wiki/Rust">Rust</a> <a href="/w/index.php">edit</a>"#;
/// let base = Url::parse("https://ru.wikipedia.org/wiki/Main").unwrap();
/// let links = extract_links(html, &base, "/wiki/", true);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains("https://ru.wikipedia.org/wiki/Rust"));
/// ```
pub fn extract_links(
    html: &str,
    base_url: &Url,
    path_prefix: &str,
    strip_fragments: bool,
) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(absolute_url) = resolve_href(href, base_url, strip_fragments) {
            if is_in_scope(&absolute_url, base_url, path_prefix) {
                links.insert(absolute_url.to_string());
            }
        }
    }

    links
}
