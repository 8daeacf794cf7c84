use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wiki_ripple::url::extract_host;
///
/// let url = Url::parse("https://RU.Wikipedia.org/wiki/Rust").unwrap();
/// assert_eq!(extract_host(&url), Some("ru.wikipedia.org".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs point at the same site
///
/// Hosts are compared case-insensitively and explicit ports must agree. The
/// scheme is ignored, so `http://` and `https://` links to the same host are
/// one site.
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (extract_host(a), extract_host(b)) {
        (Some(ha), Some(hb)) => ha == hb && a.port() == b.port(),
        _ => false,
    }
}
