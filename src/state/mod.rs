//! State module for tracking crawl progress
//!
//! This module provides the in-memory state of a single crawl run.
//!
//! # Components
//!
//! - `TraversalState`: the visited set and the all-links set, with the atomic
//!   check-then-mark operation that gates every fetch
//! - `Admission`: the outcome of trying to admit a frontier entry

mod traversal;

// Re-export main types
pub use traversal::{Admission, TraversalState};
