//! Aggregated result of one crawl run

use chrono::{DateTime, Utc};

/// Counters collected while a crawl runs
///
/// Fetch and storage failures never abort a run; they are tallied here
/// instead.
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// The seed URL the run started from
    pub seed: String,

    /// Configured depth limit
    pub max_depth: u32,

    /// Pages admitted for fetching (each URL at most once)
    pub pages_visited: u64,

    /// Total links extracted across all pages, before dedup
    pub links_extracted: u64,

    /// Links not seen before in this run
    pub links_discovered: u64,

    /// Rows the store reported as new
    pub links_inserted: u64,

    /// Pages whose fetch failed
    pub fetch_failures: u64,

    /// Batches the store rolled back
    pub storage_failures: u64,

    /// Frontier entries dropped for exceeding the depth limit
    pub depth_cutoffs: u64,

    /// Frontier entries dropped because the URL was already visited
    pub duplicate_cutoffs: u64,

    /// The page budget stopped the run early
    pub budget_exhausted: bool,

    /// The run was cancelled before the frontier drained
    pub cancelled: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlSummary {
    /// Starts a summary for a run from `seed`
    pub fn start(seed: impl Into<String>, max_depth: u32) -> Self {
        Self {
            seed: seed.into(),
            max_depth,
            pages_visited: 0,
            links_extracted: 0,
            links_discovered: 0,
            links_inserted: 0,
            fetch_failures: 0,
            storage_failures: 0,
            depth_cutoffs: 0,
            duplicate_cutoffs: 0,
            budget_exhausted: false,
            cancelled: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, if finished
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// True if no fetch or storage error occurred
    pub fn is_clean(&self) -> bool {
        self.fetch_failures == 0 && self.storage_failures == 0
    }

    /// True if the run ended because the frontier drained
    pub fn is_complete(&self) -> bool {
        !self.cancelled && !self.budget_exhausted
    }
}
