//! Frontier of discovered-but-not-yet-visited pages
//!
//! The crawl is driven by an explicit work list of `(url, depth)` entries
//! instead of recursion, so crawl depth never turns into call-stack depth.
//! Draining the list LIFO gives a depth-first traversal, FIFO breadth-first.

use crate::config::TraversalStrategy;
use std::collections::VecDeque;

/// A URL waiting to be visited, with the depth it was discovered at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to visit
    pub url: String,

    /// Link-hops from the seed; the seed is depth 1
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

/// Work list of frontier entries
///
/// Entries are not deduplicated here; the same URL may be queued several
/// times from different pages. Admission against the visited set happens when
/// an entry is popped.
#[derive(Debug)]
pub struct Frontier {
    entries: VecDeque<FrontierEntry>,
    strategy: TraversalStrategy,
}

impl Frontier {
    /// Creates an empty frontier drained according to `strategy`
    pub fn new(strategy: TraversalStrategy) -> Self {
        Self {
            entries: VecDeque::new(),
            strategy,
        }
    }

    /// Adds an entry
    pub fn push(&mut self, entry: FrontierEntry) {
        self.entries.push_back(entry);
    }

    /// Adds every URL at the same depth
    pub fn extend<I>(&mut self, urls: I, depth: u32)
    where
        I: IntoIterator<Item = String>,
    {
        self.entries
            .extend(urls.into_iter().map(|url| FrontierEntry { url, depth }));
    }

    /// Removes the next entry to visit
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        match self.strategy {
            TraversalStrategy::DepthFirst => self.entries.pop_back(),
            TraversalStrategy::BreadthFirst => self.entries.pop_front(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn strategy(&self) -> TraversalStrategy {
        self.strategy
    }
}
