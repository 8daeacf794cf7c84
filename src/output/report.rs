//! End-of-run report
//!
//! Renders a `CrawlSummary` as plain text for the terminal.

use crate::crawler::CrawlSummary;

/// Formats a crawl summary as a plain-text report
///
/// # Arguments
///
/// * `summary` - The finished run's counters
///
/// # Returns
///
/// A multi-line string ready for stdout
pub fn format_summary(summary: &CrawlSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");

    out.push_str(&format!("Seed: {}\n", summary.seed));
    out.push_str(&format!("Max depth: {}\n", summary.max_depth));
    out.push_str(&format!("Started: {}\n", summary.started_at.to_rfc3339()));
    if let Some(finished) = summary.finished_at {
        out.push_str(&format!("Finished: {}\n", finished.to_rfc3339()));
    }
    if let Some(elapsed) = summary.elapsed() {
        out.push_str(&format!(
            "Duration: {:.2} seconds\n",
            elapsed.num_milliseconds() as f64 / 1000.0
        ));
    }
    out.push_str(&format!("Status: {}\n\n", status_label(summary)));

    out.push_str("Pages:\n");
    out.push_str(&format!("  Visited: {}\n", summary.pages_visited));
    out.push_str(&format!("  Fetch failures: {}\n", summary.fetch_failures));
    out.push_str(&format!("  Depth cutoffs: {}\n", summary.depth_cutoffs));
    out.push_str(&format!(
        "  Already-visited cutoffs: {}\n\n",
        summary.duplicate_cutoffs
    ));

    out.push_str("Links:\n");
    out.push_str(&format!("  Extracted: {}\n", summary.links_extracted));
    out.push_str(&format!("  New this run: {}\n", summary.links_discovered));
    out.push_str(&format!("  Saved: {}\n", summary.links_inserted));
    out.push_str(&format!(
        "  Failed batches: {}\n",
        summary.storage_failures
    ));

    out
}

/// Prints a crawl summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    print!("{}", format_summary(summary));
}

fn status_label(summary: &CrawlSummary) -> &'static str {
    if summary.cancelled {
        "cancelled"
    } else if summary.budget_exhausted {
        "page budget reached"
    } else if summary.is_clean() {
        "completed"
    } else {
        "completed with errors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_summary() -> CrawlSummary {
        let mut summary = CrawlSummary::start("https://ru.wikipedia.org/wiki/Rust", 3);
        summary.pages_visited = 12;
        summary.links_extracted = 340;
        summary.links_discovered = 97;
        summary.links_inserted = 90;
        summary.finish();
        summary
    }

    #[test]
    fn test_format_contains_counters() {
        let report = format_summary(&create_test_summary());

        assert!(report.starts_with("=== Crawl Summary ==="));
        assert!(report.contains("Seed: https://ru.wikipedia.org/wiki/Rust"));
        assert!(report.contains("Visited: 12"));
        assert!(report.contains("New this run: 97"));
        assert!(report.contains("Saved: 90"));
        assert!(report.contains("Duration:"));
        assert!(report.contains("Status: completed\n"));
    }

    #[test]
    fn test_status_reflects_failures() {
        let mut summary = create_test_summary();
        summary.fetch_failures = 2;
        assert!(format_summary(&summary).contains("Status: completed with errors"));

        summary.budget_exhausted = true;
        assert!(format_summary(&summary).contains("Status: page budget reached"));

        summary.cancelled = true;
        assert!(format_summary(&summary).contains("Status: cancelled"));
    }

    #[test]
    fn test_unfinished_summary_has_no_duration() {
        let summary = CrawlSummary::start("https://example.com/wiki/A", 6);
        let report = format_summary(&summary);
        assert!(!report.contains("Finished:"));
        assert!(!report.contains("Duration:"));
    }
}
