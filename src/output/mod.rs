//! Crawl output
//!
//! Snapshot persistence (the durable JSON record set) and the end-of-run
//! crawl report with its counters.

mod report;
mod snapshot;

pub use report::{print_report, CrawlReport};
pub use snapshot::SnapshotWriter;
