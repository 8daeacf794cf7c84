use url::Url;

/// Checks whether a URL's path starts with the given prefix
///
/// The comparison is made on the percent-encoded path, exactly as it appears
/// in the URL. An empty prefix matches everything.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wiki_ripple::url::matches_path_prefix;
///
/// let url = Url::parse("https://ru.wikipedia.org/wiki/Rust").unwrap();
/// assert!(matches_path_prefix(&url, "/wiki/"));
/// assert!(!matches_path_prefix(&url, "/w/"));
/// ```
pub fn matches_path_prefix(url: &Url, prefix: &str) -> bool {
    url.path().starts_with(prefix)
}
