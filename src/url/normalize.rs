use crate::{UrlError, UrlResult};
use url::Url;

/// Schemes an href may carry that can never lead to a page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Parses and checks the seed URL given on the command line
///
/// The seed must be an absolute http(s) URL with a host. Its identity in the
/// crawl is the parser's serialization, the same form extracted links take,
/// so `https://Host` and `https://host/` name one page.
///
/// # Examples
///
/// ```
/// use wiki_ripple::url::parse_seed_url;
///
/// let url = parse_seed_url("https://ru.wikipedia.org/wiki/Rust").unwrap();
/// assert_eq!(url.host_str(), Some("ru.wikipedia.org"));
///
/// assert!(parse_seed_url("ftp://example.com/").is_err());
/// assert!(parse_seed_url("/wiki/Rust").is_err());
/// ```
pub fn parse_seed_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves an href found on `base_url` to an absolute URL
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs (same page anchors)
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - hrefs that do not resolve
/// - non-HTTP(S) URLs after resolution
///
/// When `strip_fragment` is set the `#fragment` is removed, so links to
/// different sections of one article resolve to the same URL.
pub fn resolve_href(href: &str, base_url: &Url, strip_fragment: bool) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    if strip_fragment {
        absolute_url.set_fragment(None);
    }

    Some(absolute_url)
}
