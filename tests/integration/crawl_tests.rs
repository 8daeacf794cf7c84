//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end against a file-backed database.

use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;
use wiki_ripple::config::{Config, CountPolicy, CrawlerConfig, TraversalStrategy};
use wiki_ripple::crawler::{crawl, CrawlEngine};
use wiki_ripple::storage::{open_storage, LinkStore, SqliteLinkStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given depth limit
fn create_test_config(max_depth: u32, db_path: &Path) -> Config {
    let mut config = Config::default();
    config.crawler = CrawlerConfig {
        max_depth,
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
        ..CrawlerConfig::default()
    };
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config.output.database_path = db_path.to_string_lossy().into_owned();
    config
}

/// Serves `/wiki/<name>` with anchors to each child article
async fn mount_page(server: &MockServer, name: &str, children: &[&str]) {
    let anchors: String = children
        .iter()
        .map(|child| format!(r#"<li><a href="/wiki/{}">{}</a></li>"#, child, child))
        .collect();
    let body = format!(
        r#"<html><head><title>{}</title></head><body>
        <ul>{}</ul>
        <a href="/w/index.php?title={}&action=edit">edit</a>
        <a href="https://other.example.org/wiki/Elsewhere">elsewhere</a>
        </body></html>"#,
        name, anchors, name
    );

    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

fn open(db_path: &Path) -> SqliteLinkStore {
    open_storage(db_path, CountPolicy::Inserted).expect("Failed to open database")
}

fn stored_urls(store: &SqliteLinkStore) -> HashSet<String> {
    store
        .list_links()
        .expect("Failed to list links")
        .into_iter()
        .map(|record| record.url)
        .collect()
}

fn article(server: &MockServer, name: &str) -> String {
    format!("{}/wiki/{}", server.uri(), name)
}

fn requested_paths(requests: &[wiremock::Request]) -> Vec<String> {
    requests.iter().map(|r| r.url.path().to_string()).collect()
}

#[tokio::test]
async fn test_full_crawl_depth_two() {
    let server = MockServer::start().await;
    mount_page(&server, "A", &["B", "C"]).await;
    mount_page(&server, "B", &["C", "D"]).await;
    mount_page(&server, "C", &[]).await;
    mount_page(&server, "D", &["E"]).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("links.db");
    let config = create_test_config(2, &db_path);

    let summary = crawl(&config, &article(&server, "A"), open(&db_path))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_visited, 3);
    assert_eq!(summary.fetch_failures, 0);
    assert!(summary.is_complete());

    let requests = server.received_requests().await.unwrap();
    let paths: HashSet<String> = requested_paths(&requests).into_iter().collect();
    let expected: HashSet<String> = ["/wiki/A", "/wiki/B", "/wiki/C"]
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(paths, expected);
    assert_eq!(requests.len(), 3);

    let expected_rows: HashSet<String> = ["B", "C", "D"]
        .iter()
        .map(|name| article(&server, name))
        .collect();
    assert_eq!(stored_urls(&open(&db_path)), expected_rows);
}

#[tokio::test]
async fn test_missing_page_does_not_stop_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "A", &["Missing", "B"]).await;
    mount_page(&server, "B", &["C"]).await;
    mount_page(&server, "C", &[]).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("links.db");
    let config = create_test_config(6, &db_path);

    let summary = crawl(&config, &article(&server, "A"), open(&db_path))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(summary.pages_visited, 4);

    let store = open(&db_path);
    assert!(store.contains(&article(&server, "Missing")).unwrap());
    assert!(store.contains(&article(&server, "C")).unwrap());
}

#[tokio::test]
async fn test_rerun_adds_no_duplicate_rows() {
    let server = MockServer::start().await;
    mount_page(&server, "A", &["B", "C"]).await;
    mount_page(&server, "B", &["A", "C"]).await;
    mount_page(&server, "C", &["B"]).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("links.db");
    let config = create_test_config(4, &db_path);

    let first = crawl(&config, &article(&server, "A"), open(&db_path))
        .await
        .unwrap();
    let second = crawl(&config, &article(&server, "A"), open(&db_path))
        .await
        .unwrap();

    assert_eq!(first.links_inserted, 2);
    assert_eq!(second.links_discovered, 2);
    assert_eq!(second.links_inserted, 0);
    assert_eq!(open(&db_path).count_links().unwrap(), 2);
}

#[tokio::test]
async fn test_breadth_first_with_concurrency() {
    let server = MockServer::start().await;
    mount_page(&server, "A", &["B", "C", "D"]).await;
    mount_page(&server, "B", &["E"]).await;
    mount_page(&server, "C", &["E", "F"]).await;
    mount_page(&server, "D", &["A"]).await;
    mount_page(&server, "E", &[]).await;
    mount_page(&server, "F", &[]).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("links.db");
    let mut config = create_test_config(3, &db_path);
    config.crawler.strategy = TraversalStrategy::BreadthFirst;
    config.crawler.max_concurrent_fetches = 3;

    let mut engine = CrawlEngine::from_config(&config, open(&db_path)).unwrap();
    let summary = engine.run(&article(&server, "A")).await.unwrap();

    assert_eq!(summary.pages_visited, 6);

    // Every page is requested exactly once
    let requests = server.received_requests().await.unwrap();
    let paths = requested_paths(&requests);
    let unique: HashSet<&String> = paths.iter().collect();
    assert_eq!(paths.len(), 6);
    assert_eq!(unique.len(), 6);
    assert_eq!(paths[0], "/wiki/A");

    assert_eq!(engine.store().count_links().unwrap(), 5);
}

#[tokio::test]
async fn test_other_sites_and_paths_are_ignored() {
    let server = MockServer::start().await;
    mount_page(&server, "A", &["B"]).await;
    mount_page(&server, "B", &[]).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("links.db");
    let config = create_test_config(6, &db_path);

    crawl(&config, &article(&server, "A"), open(&db_path))
        .await
        .unwrap();

    let rows = stored_urls(&open(&db_path));
    assert_eq!(rows.len(), 1);
    assert!(rows.contains(&article(&server, "B")));

    let requests = server.received_requests().await.unwrap();
    assert!(requested_paths(&requests)
        .iter()
        .all(|p| p.starts_with("/wiki/")));
}

#[tokio::test]
async fn test_redirected_page_resolves_links_from_its_new_location() {
    let server = MockServer::start().await;
    mount_page(&server, "A", &["Old"]).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/wiki/moved/New", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/moved/New"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body><a href="Child">child</a></body></html>"#,
            "text/html",
        ))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("links.db");
    let config = create_test_config(2, &db_path);

    let summary = crawl(&config, &article(&server, "A"), open(&db_path))
        .await
        .unwrap();

    assert_eq!(summary.fetch_failures, 0);
    let rows = stored_urls(&open(&db_path));
    assert!(rows.contains(&article(&server, "moved/Child")));
    assert!(!rows.contains(&article(&server, "Child")));
}

#[tokio::test]
async fn test_invalid_seed_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("links.db");
    let config = create_test_config(6, &db_path);

    let result = crawl(&config, "mailto:someone@example.com", open(&db_path)).await;
    assert!(result.is_err());
}
