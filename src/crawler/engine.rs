//! Crawl engine - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates all aspects of a run:
//! - Owning the traversal state (visited set and all-links set)
//! - Draining the frontier depth-first or breadth-first
//! - Fetching pages, optionally several at once
//! - Extracting links, computing the new ones, and handing them to the store
//! - Honoring cancellation
//!
//! All mutation of traversal state and every store write happens on the task
//! that drives `run`. Only fetches are fanned out.

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchError, FetchedPage, Fetcher, HttpFetcher};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::parser::{AnchorExtractor, LinkExtractor};
use crate::crawler::summary::CrawlSummary;
use crate::state::{Admission, TraversalState};
use crate::storage::LinkStore;
use crate::url::parse_seed_url;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// A visited entry together with what fetching it produced
type FetchOutcome = (FrontierEntry, Result<FetchedPage, FetchError>);

/// Main crawl engine structure
pub struct CrawlEngine<S: LinkStore> {
    config: CrawlerConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    store: S,
    state: TraversalState,
    cancel: CancellationToken,
}

impl<S: LinkStore> CrawlEngine<S> {
    /// Creates an engine from its collaborators
    ///
    /// # Arguments
    ///
    /// * `config` - Depth limit, traversal strategy, concurrency and page budget
    /// * `fetcher` - Retrieves documents
    /// * `extractor` - Turns documents into candidate links
    /// * `store` - Receives newly discovered links
    pub fn new(
        config: CrawlerConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
        store: S,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            store,
            state: TraversalState::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Validates `config` and creates an engine with the HTTP fetcher and anchor extractor
    pub fn from_config(config: &Config, store: S) -> crate::Result<Self> {
        validate(config)?;

        let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent)?;
        let extractor = AnchorExtractor::new(config.crawler.path_prefix.clone())
            .strip_fragments(config.crawler.strip_fragments);

        Ok(Self::new(
            config.crawler.clone(),
            Arc::new(fetcher),
            Arc::new(extractor),
            store,
        ))
    }

    /// Replaces the engine's cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this engine's runs
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Traversal state of the latest run
    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Crawls from `seed` until the frontier drains
    ///
    /// Each call is a fresh run with empty traversal state. The seed is depth
    /// 1; pages deeper than `max_depth` are never fetched. With
    /// `strip_fragments` the seed loses its `#fragment` like every extracted
    /// link. Fetch and storage errors are logged and counted in the returned
    /// summary, never propagated.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - The run finished, was cancelled, or hit its page budget
    /// * `Err(WikiRippleError)` - The seed is not a valid http(s) URL
    pub async fn run(&mut self, seed: &str) -> crate::Result<CrawlSummary> {
        let mut seed_url = parse_seed_url(seed)?;
        if self.config.strip_fragments {
            seed_url.set_fragment(None);
        }
        let max_depth = self.config.max_depth;

        self.state = TraversalState::new();
        let mut summary = CrawlSummary::start(seed_url.as_str(), max_depth);
        let mut frontier = Frontier::new(self.config.strategy);
        frontier.push(FrontierEntry::new(seed_url.as_str(), 1));

        tracing::info!(
            "Starting crawl from {} (max depth {}, {:?}, {} concurrent)",
            seed_url,
            max_depth,
            self.config.strategy,
            self.config.max_concurrent_fetches
        );

        loop {
            if self.cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let batch = self.admit_batch(&mut frontier, &mut summary);
            if batch.is_empty() {
                break;
            }

            let Some(outcomes) = self.fetch_batch(batch, &mut summary).await else {
                summary.cancelled = true;
                break;
            };

            for (entry, result) in outcomes {
                self.process_page(entry, result, &mut frontier, &mut summary);
            }
        }

        if summary.cancelled {
            tracing::warn!(
                "Crawl cancelled with {} entries left in the frontier",
                frontier.len()
            );
        }

        summary.finish();
        tracing::info!(
            "Crawl finished: {} pages visited, {} links discovered, {} saved",
            summary.pages_visited,
            summary.links_discovered,
            summary.links_inserted
        );

        Ok(summary)
    }

    /// Pops frontier entries until enough have been admitted to fill one batch
    fn admit_batch(
        &mut self,
        frontier: &mut Frontier,
        summary: &mut CrawlSummary,
    ) -> Vec<FrontierEntry> {
        let limit = self.config.max_concurrent_fetches.max(1) as usize;
        let mut batch = Vec::with_capacity(limit);

        while batch.len() < limit {
            if let Some(max_pages) = self.config.max_pages {
                if summary.pages_visited >= max_pages {
                    if !frontier.is_empty() && !summary.budget_exhausted {
                        tracing::warn!("Page budget of {} reached, stopping", max_pages);
                        summary.budget_exhausted = true;
                    }
                    break;
                }
            }

            let Some(entry) = frontier.pop() else {
                break;
            };

            match self
                .state
                .check_and_mark(&entry.url, entry.depth, self.config.max_depth)
            {
                Admission::Admitted => {
                    tracing::info!("Depth {}, processing: {}", entry.depth, entry.url);
                    summary.pages_visited += 1;
                    batch.push(entry);
                }
                Admission::TooDeep => {
                    tracing::debug!("Depth {} exceeds limit, skipping {}", entry.depth, entry.url);
                    summary.depth_cutoffs += 1;
                }
                Admission::AlreadyVisited => {
                    tracing::trace!("Already visited {}", entry.url);
                    summary.duplicate_cutoffs += 1;
                }
            }
        }

        batch
    }

    /// Fetches every admitted entry concurrently
    ///
    /// Returns None if the run was cancelled; in-flight fetches are aborted
    /// and their results discarded.
    async fn fetch_batch(
        &self,
        batch: Vec<FrontierEntry>,
        summary: &mut CrawlSummary,
    ) -> Option<Vec<FetchOutcome>> {
        let mut tasks = JoinSet::new();
        for entry in batch {
            let fetcher = Arc::clone(&self.fetcher);
            tasks.spawn(async move {
                let result = fetcher.fetch(&entry.url).await;
                (entry, result)
            });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tasks.abort_all();
                    return None;
                }
                joined = tasks.join_next() => match joined {
                    Some(Ok(outcome)) => outcomes.push(outcome),
                    Some(Err(e)) => {
                        tracing::error!("Fetch task failed: {}", e);
                        summary.fetch_failures += 1;
                    }
                    None => break,
                },
            }
        }

        Some(outcomes)
    }

    /// Extracts links from a fetched page, stores the new ones and queues all of them
    fn process_page(
        &mut self,
        entry: FrontierEntry,
        result: Result<FetchedPage, FetchError>,
        frontier: &mut Frontier,
        summary: &mut CrawlSummary,
    ) {
        // A failed fetch is a visited page with no links
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", entry.url, e);
                summary.fetch_failures += 1;
                return;
            }
        };

        // Relative hrefs resolve against where the page was served from
        let extracted = self.extractor.extract(&page.body, &page.final_url);
        summary.links_extracted += extracted.len() as u64;

        let new_links = self.state.take_new_links(&extracted);
        summary.links_discovered += new_links.len() as u64;
        self.save_links(&entry.url, &new_links, summary);

        // Known links are queued too; admission filters the visited ones
        if entry.depth >= self.config.max_depth {
            summary.depth_cutoffs += extracted.len() as u64;
        } else {
            frontier.extend(extracted, entry.depth + 1);
        }
    }

    /// Hands new links to the store; a failed batch is logged and released
    fn save_links(&mut self, source: &str, new_links: &HashSet<String>, summary: &mut CrawlSummary) {
        if new_links.is_empty() {
            tracing::debug!("No new links on {}", source);
            return;
        }

        match self.store.insert_if_absent_batch(new_links) {
            Ok(inserted) => {
                tracing::info!("Saved {} new links from {}", inserted, source);
                summary.links_inserted += inserted;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to save {} links from {}: {}",
                    new_links.len(),
                    source,
                    e
                );
                summary.storage_failures += 1;
                self.state.release_links(new_links);
            }
        }
    }
}
