//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML parsing and link extraction behind the `LinkExtractor` trait
//! - The depth-bounded frontier
//! - Overall crawl orchestration and the run summary

mod engine;
mod fetcher;
mod frontier;
mod parser;
mod summary;

pub use engine::CrawlEngine;
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::{extract_links, AnchorExtractor, LinkExtractor};
pub use summary::CrawlSummary;

use crate::config::Config;
use crate::storage::LinkStore;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher and anchor extractor from `config`
/// 2. Traverse the site from `seed` up to `config.crawler.max_depth`
/// 3. Hand every newly discovered link to `store`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - Absolute http(s) URL of the first page
/// * `store` - Receives the discovered links
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl ran to completion
/// * `Err(WikiRippleError)` - The seed was invalid or the client could not be built
pub async fn crawl<S: LinkStore>(
    config: &Config,
    seed: &str,
    store: S,
) -> crate::Result<CrawlSummary> {
    let mut engine = CrawlEngine::from_config(config, store)?;
    engine.run(seed).await
}
