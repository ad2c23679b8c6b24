//! Crawl report
//!
//! Counters and the committed record set for one crawl run, handed back to
//! the caller and printed at the end of a CLI run.

use crate::page::PageKind;
use crate::pipeline::RejectReason;
use crate::record::CharacterRecord;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Summary of a finished (or finishing) crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Seed URL the crawl started from
    pub seed: String,

    /// Wiki slug the snapshot path was derived from
    pub slug: String,

    /// Hash of the config file, when one was used
    pub config_hash: Option<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages fetched successfully
    pub pages_fetched: u64,

    /// Pages discarded because the fetch failed
    pub pages_unavailable: u64,

    /// Classification counts per page kind
    pub pages_by_kind: HashMap<PageKind, u64>,

    /// Detail pages with no extractable name
    pub extraction_missed: u64,

    /// Candidates the extractor produced, before any pipeline stage
    pub candidates_extracted: u64,

    /// Pipeline rejections per reason code
    pub rejections: HashMap<RejectReason, u64>,

    /// The committed record set, in commit order
    pub records: Vec<CharacterRecord>,

    /// True when the crawl ended because the record limit was hit, false
    /// when the frontier was exhausted first
    pub limit_reached: bool,
}

impl CrawlReport {
    pub fn new(seed: String, slug: String, config_hash: Option<String>) -> Self {
        Self {
            seed,
            slug,
            config_hash,
            started_at: Utc::now(),
            finished_at: None,
            pages_fetched: 0,
            pages_unavailable: 0,
            pages_by_kind: HashMap::new(),
            extraction_missed: 0,
            candidates_extracted: 0,
            rejections: HashMap::new(),
            records: Vec::new(),
            limit_reached: false,
        }
    }

    pub fn record_page_kind(&mut self, kind: PageKind) {
        *self.pages_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn record_rejection(&mut self, reason: RejectReason) {
        *self.rejections.entry(reason).or_insert(0) += 1;
    }

    /// Number of committed records
    pub fn committed_count(&self) -> usize {
        self.records.len()
    }

    /// Total pipeline rejections across all reasons
    pub fn total_rejections(&self) -> u64 {
        self.rejections.values().sum()
    }

    /// Marks the run finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_seconds())
    }
}

/// Prints a human-readable run summary to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Fandex Crawl Summary ===\n");
    println!("Seed:     {}", report.seed);
    println!("Wiki:     {}", report.slug);
    if let Some(hash) = &report.config_hash {
        println!("Config:   {}", hash);
    }
    if let Some(secs) = report.duration_seconds() {
        println!("Duration: {}s", secs);
    }

    println!("\nPages:");
    println!("  Fetched:     {}", report.pages_fetched);
    println!("  Unavailable: {}", report.pages_unavailable);
    for kind in [
        PageKind::Hub,
        PageKind::List,
        PageKind::Category,
        PageKind::Detail,
        PageKind::Unknown,
    ] {
        if let Some(count) = report.pages_by_kind.get(&kind) {
            println!("  {:<12} {}", format!("{}:", kind), count);
        }
    }

    println!("\nCandidates:");
    println!("  Extracted:     {}", report.candidates_extracted);
    println!("  No name found: {}", report.extraction_missed);
    let mut rejections: Vec<_> = report.rejections.iter().collect();
    rejections.sort_by_key(|(reason, _)| reason.to_string());
    for (reason, count) in rejections {
        println!("  {:<20} {}", format!("{}:", reason), count);
    }

    println!(
        "\nCommitted: {} record{}{}",
        report.committed_count(),
        if report.committed_count() == 1 { "" } else { "s" },
        if report.limit_reached {
            " (record limit reached)"
        } else {
            " (frontier exhausted)"
        }
    );
}
