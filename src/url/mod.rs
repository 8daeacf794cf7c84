//! URL handling module for Wiki-Ripple
//!
//! URLs are opaque identity keys once they leave this module. The only
//! canonicalization performed anywhere is here: resolving an href against the
//! page it was found on, and optionally dropping the fragment.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, same_site};
pub use matcher::matches_path_prefix;
pub use normalize::{parse_seed_url, resolve_href};

use ::url::Url;

/// Decides whether a resolved link belongs to the crawl scope
///
/// A link is in scope when it lives on the same site as the page it was found
/// on and its path starts with `path_prefix`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wiki_ripple::url::is_in_scope;
///
/// let base = Url::parse("https://ru.wikipedia.org/wiki/Rust").unwrap();
/// let link = Url::parse("https://ru.wikipedia.org/wiki/Cargo").unwrap();
/// assert!(is_in_scope(&link, &base, "/wiki/"));
///
/// let other = Url::parse("https://en.wikipedia.org/wiki/Cargo").unwrap();
/// assert!(!is_in_scope(&other, &base, "/wiki/"));
/// ```
pub fn is_in_scope(link: &Url, base: &Url, path_prefix: &str) -> bool {
    same_site(link, base) && matches_path_prefix(link, path_prefix)
}
