use serde::Deserialize;

/// Default maximum crawl depth, counting the seed as depth 1
pub const DEFAULT_MAX_DEPTH: u32 = 6;

/// Default anchor path prefix for article links
pub const DEFAULT_PATH_PREFIX: &str = "/wiki/";

/// Default SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "wiki_links.db";

/// Main configuration structure for Wiki-Ripple
///
/// Every section is optional; missing values fall back to the defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Order in which the frontier is drained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalStrategy {
    /// LIFO work-stack
    #[default]
    DepthFirst,
    /// FIFO work-queue
    BreadthFirst,
}

/// How the link store reports the size of a batch insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountPolicy {
    /// Count only rows the database actually inserted
    #[default]
    Inserted,
    /// Count every URL handed to the store, inserted or ignored
    Attempted,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum depth to crawl, the seed page being depth 1
    pub max_depth: u32,

    /// Only anchors whose path starts with this prefix are followed
    pub path_prefix: String,

    /// Depth-first or breadth-first frontier
    pub strategy: TraversalStrategy,

    /// Number of fetches allowed in flight at once
    pub max_concurrent_fetches: u32,

    /// Stop after this many pages have been visited
    pub max_pages: Option<u64>,

    /// Drop `#fragment` from extracted links
    pub strip_fragments: bool,

    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            strategy: TraversalStrategy::default(),
            max_concurrent_fetches: 1,
            max_pages: None,
            strip_fragments: true,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "WikiRipple".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(url) => format!("{}/{} (+{})", self.crawler_name, self.crawler_version, url),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the SQLite database file
    pub database_path: String,

    /// Insert count reporting policy
    pub count_policy: CountPolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            count_policy: CountPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.crawler.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.crawler.path_prefix, "/wiki/");
        assert_eq!(config.crawler.strategy, TraversalStrategy::DepthFirst);
        assert_eq!(config.output.database_path, "wiki_links.db");
        assert_eq!(config.output.count_policy, CountPolicy::Inserted);
    }

    #[test]
    fn test_kebab_case_enums() {
        let config: Config = toml::from_str(
            r#"
[crawler]
strategy = "breadth-first"

[output]
count-policy = "attempted"
"#,
        )
        .unwrap();
        assert_eq!(config.crawler.strategy, TraversalStrategy::BreadthFirst);
        assert_eq!(config.output.count_policy, CountPolicy::Attempted);
    }

    #[test]
    fn test_user_agent_header() {
        let mut ua = UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: None,
        };
        assert_eq!(ua.header_value(), "TestCrawler/1.0");

        ua.contact_url = Some("https://example.com/about".to_string());
        assert_eq!(
            ua.header_value(),
            "TestCrawler/1.0 (+https://example.com/about)"
        );
    }
}
