//! Statistics generation from the link database
//!
//! This module provides functionality for extracting and displaying
//! statistics about the stored links, independent of any crawl run.

use crate::storage::{get_schema_version, LinkStore, StorageResult};
use std::collections::HashMap;
use url::Url;

/// How many of the most recently stored links are shown
const RECENT_LINKS: usize = 10;

/// Link database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStatistics {
    /// Total number of stored links
    pub total_links: u64,

    /// Number of links per host, sorted by count (descending)
    pub links_by_host: Vec<(String, u64)>,

    /// Most recently stored links, newest first
    pub recent_links: Vec<String>,

    /// Schema version of the database
    pub schema_version: u32,
}

/// Loads statistics from a link store
///
/// # Arguments
///
/// * `store` - The store to query
///
/// # Returns
///
/// * `Ok(DatabaseStatistics)` - Successfully loaded statistics
/// * `Err(StorageError)` - Failed to query the store
pub fn load_statistics(store: &dyn LinkStore) -> StorageResult<DatabaseStatistics> {
    let total_links = store.count_links()?;
    let records = store.list_links()?;

    let mut by_host: HashMap<String, u64> = HashMap::new();
    for record in &records {
        let host = Url::parse(&record.url)
            .ok()
            .and_then(|url| url.host_str().map(|h| h.to_lowercase()))
            .unwrap_or_else(|| "(unparseable)".to_string());
        *by_host.entry(host).or_insert(0) += 1;
    }

    let mut links_by_host: Vec<(String, u64)> = by_host.into_iter().collect();
    links_by_host.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let recent_links = records
        .iter()
        .rev()
        .take(RECENT_LINKS)
        .map(|record| record.url.clone())
        .collect();

    Ok(DatabaseStatistics {
        total_links,
        links_by_host,
        recent_links,
        schema_version: get_schema_version(),
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &DatabaseStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total links stored: {}", stats.total_links);
    println!("  Schema version: {}", stats.schema_version);
    println!();

    if !stats.links_by_host.is_empty() {
        println!("Links by Host:");
        for (host, count) in &stats.links_by_host {
            let percentage = if stats.total_links > 0 {
                (*count as f64 / stats.total_links as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", host, count, percentage);
        }
        println!();
    }

    if !stats.recent_links.is_empty() {
        println!("Most Recent ({}):", stats.recent_links.len());
        for url in &stats.recent_links {
            println!("  - {}", url);
        }
    }
}
