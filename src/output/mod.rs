//! Output module for crawl reports and database statistics
//!
//! This module handles:
//! - Printing the end-of-run summary
//! - Reading statistics back from an existing link database

mod report;
pub mod stats;

pub use report::{format_summary, print_summary};
pub use stats::{load_statistics, print_statistics, DatabaseStatistics};
