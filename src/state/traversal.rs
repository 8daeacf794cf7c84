//! Per-run traversal state: which pages were visited and which links are known
//!
//! Owned by exactly one crawl engine for the lifetime of a run and never
//! persisted.
use std::collections::HashSet;

/// Result of trying to admit a `(url, depth)` frontier entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The entry passed both checks and is now marked visited
    Admitted,
    /// `depth` is beyond the configured maximum
    TooDeep,
    /// The URL was already visited in this run
    AlreadyVisited,
}

impl Admission {
    /// Returns true if the page should be fetched
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Visited set and all-links set of one crawl run
#[derive(Debug, Default)]
pub struct TraversalState {
    /// Pages that have been (or are being) fetched
    visited: HashSet<String>,

    /// Every URL seen in this run: the seed plus all discovered links
    all_links: HashSet<String>,

    /// Known links whose store batch was rolled back
    unsaved: HashSet<String>,
}

impl TraversalState {
    /// Creates empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks depth and visited membership, then marks the URL visited
    ///
    /// The depth check comes first, then the visited check; nothing is
    /// mutated unless both pass. On admission the URL is added to both the
    /// visited set and the all-links set in the same call, so a URL is visited
    /// at most once.
    pub fn check_and_mark(&mut self, url: &str, depth: u32, max_depth: u32) -> Admission {
        if depth > max_depth {
            return Admission::TooDeep;
        }

        if self.visited.contains(url) {
            return Admission::AlreadyVisited;
        }

        self.visited.insert(url.to_string());
        self.all_links.insert(url.to_string());
        Admission::Admitted
    }

    /// Computes `extracted − all_links` and records the difference as known
    ///
    /// Returns the links that were not seen anywhere in this run before,
    /// plus any extracted link still waiting to be saved after a rolled-back
    /// batch.
    pub fn take_new_links(&mut self, extracted: &HashSet<String>) -> HashSet<String> {
        let new_links: HashSet<String> = extracted
            .iter()
            .filter(|link| {
                !self.all_links.contains(link.as_str()) || self.unsaved.contains(link.as_str())
            })
            .cloned()
            .collect();

        for link in &new_links {
            self.unsaved.remove(link);
            self.all_links.insert(link.clone());
        }
        new_links
    }

    /// Marks links from a rolled-back batch so the next page listing them offers them again
    ///
    /// Visited links are included; being fetched does not put a URL in the
    /// store.
    pub fn release_links(&mut self, links: &HashSet<String>) {
        self.unsaved.extend(links.iter().cloned());
    }

    /// Number of links waiting to be offered to the store again
    pub fn unsaved_count(&self) -> usize {
        self.unsaved.len()
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if the URL has been seen in this run
    pub fn is_known(&self, url: &str) -> bool {
        self.all_links.contains(url)
    }

    /// Number of visited pages
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of distinct URLs seen
    pub fn known_count(&self) -> usize {
        self.all_links.len()
    }
}
