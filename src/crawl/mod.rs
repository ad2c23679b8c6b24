//! Crawl orchestration
//!
//! The frontier (task queue + visited set) and the coordinator that drives
//! the fetch/classify/extract/commit loop.

mod coordinator;
mod frontier;

pub use coordinator::{run_crawl, Coordinator};
pub use frontier::{CrawlTask, Frontier};
