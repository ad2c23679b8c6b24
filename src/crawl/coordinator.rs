//! Crawl coordinator - main crawl orchestration logic
//!
//! Drives the loop: pull next frontier task, fetch, classify, expand or
//! extract, push candidates through the pipeline, and stop once the record
//! limit is reached. Fetches run concurrently up to a bounded pool size;
//! classification, extraction, and pipeline stages run synchronously on
//! each completed fetch, so the commit sequence (append record, write
//! snapshot) is a single critical section and completion interleavings can
//! never produce a snapshot that lags its record count.

use crate::config::Config;
use crate::crawl::frontier::{CrawlTask, Frontier};
use crate::fetch::{build_http_client, fetch_page, FetchOutcome};
use crate::output::{CrawlReport, SnapshotWriter};
use crate::page::{classify, discover_links, extract_candidate, PageDoc, PageKind};
use crate::pipeline::Pipeline;
use crate::url::{normalize_seed, wiki_slug};
use crate::{FandexError, Result};
use reqwest::Client;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;
use url::Url;

/// Mutable crawl state shared across concurrently-completing fetch flows
///
/// One coarse lock guards all of it; throughput needs here are modest and a
/// single lock keeps every check-and-insert atomic.
struct CrawlState {
    frontier: Frontier,
    pipeline: Pipeline,
    report: CrawlReport,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    seed: Url,
    snapshot: SnapshotWriter,
    state: Arc<Mutex<CrawlState>>,
}

impl Coordinator {
    /// Creates a new coordinator for one crawl run
    ///
    /// Validates and normalizes the seed URL; a malformed or wrong-domain
    /// seed is fatal and the crawl never starts.
    pub fn new(config: Config, seed: &str, config_hash: Option<String>) -> Result<Self> {
        let seed_url = normalize_seed(seed, &config.wiki.allowed_domain).map_err(|e| {
            FandexError::InvalidSeedUrl {
                url: seed.to_string(),
                reason: e.to_string(),
            }
        })?;

        let slug = wiki_slug(&seed_url, &config.wiki.allowed_domain);
        let snapshot = SnapshotWriter::new(Path::new(&config.output.data_dir), &slug)?;
        let client = build_http_client(&config.crawler, &config.user_agent)?;

        let mut frontier = Frontier::new(&seed_url);
        frontier.offer(seed_url.clone(), None);

        let pipeline = Pipeline::new(&config.image_cache);
        let report = CrawlReport::new(seed_url.to_string(), slug, config_hash);

        Ok(Self {
            config,
            client,
            seed: seed_url,
            snapshot,
            state: Arc::new(Mutex::new(CrawlState {
                frontier,
                pipeline,
                report,
            })),
        })
    }

    /// The normalized seed URL
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Path of the snapshot file this run writes
    pub fn snapshot_path(&self) -> &Path {
        self.snapshot.path()
    }

    /// Runs the crawl to completion
    ///
    /// Terminates when the record limit is reached or the frontier is
    /// exhausted, whichever comes first. A final snapshot write is forced
    /// on the way out so the persisted file reflects exactly the committed
    /// set at termination.
    pub async fn run(&mut self) -> Result<CrawlReport> {
        tracing::info!(
            "Starting crawl of {} (record limit {})",
            self.seed,
            self.config.crawler.record_limit
        );

        let max_in_flight = self.config.crawler.max_concurrent_fetches as usize;
        let mut in_flight: JoinSet<(CrawlTask, FetchOutcome)> = JoinSet::new();
        let mut pages_processed: u64 = 0;

        loop {
            // Fill the fetch pool up to the concurrency bound
            while in_flight.len() < max_in_flight {
                let task = {
                    let mut state = self.state.lock().unwrap();
                    state.frontier.next()
                };
                let Some(task) = task else { break };

                tracing::debug!("Fetching {}", task.url);
                let client = self.client.clone();
                in_flight.spawn(async move {
                    let outcome = fetch_page(&client, &task.url).await;
                    (task, outcome)
                });
            }

            // Pool and frontier both empty: the crawl is done
            match in_flight.join_next().await {
                Some(Ok((task, outcome))) => {
                    self.process_fetched(task, outcome)?;
                    pages_processed += 1;

                    if pages_processed % 10 == 0 {
                        let state = self.state.lock().unwrap();
                        tracing::info!(
                            "Progress: {} pages processed, {} records, {} in frontier",
                            pages_processed,
                            state.report.committed_count(),
                            state.frontier.len()
                        );
                    }
                }
                Some(Err(e)) => {
                    tracing::error!("Fetch task failed: {}", e);
                }
                None => break,
            }
        }

        self.finish()
    }

    /// Processes one completed fetch: classify, then expand or extract
    ///
    /// Runs synchronously; per-page failures are absorbed here and only
    /// snapshot write errors propagate.
    fn process_fetched(&self, task: CrawlTask, outcome: FetchOutcome) -> Result<()> {
        let (final_url, body) = match outcome {
            FetchOutcome::Success { final_url, body } => (final_url, body),
            FetchOutcome::Unavailable { reason } => {
                tracing::debug!("Page {} unavailable: {}", task.url, reason);
                let mut state = self.state.lock().unwrap();
                state.report.pages_unavailable += 1;
                return Ok(());
            }
        };

        let doc = PageDoc::parse(&body, final_url);
        let kind = classify(&doc, task.hint, &self.config.classifier);
        tracing::debug!("Classified {} as {}", doc.url(), kind);

        {
            let mut state = self.state.lock().unwrap();
            state.report.pages_fetched += 1;
            state.report.record_page_kind(kind);
        }

        if kind.is_expandable() {
            self.expand(&doc, kind);
            return Ok(());
        }

        if kind == PageKind::Detail {
            return self.extract_and_commit(&doc);
        }

        // Unknown pages are discarded without expansion
        Ok(())
    }

    /// Re-offers a page's discovered links to the frontier
    ///
    /// Once the record limit has been reached the frontier is stopped and
    /// every offer is refused, so late-completing fetches drain harmlessly.
    fn expand(&self, doc: &PageDoc, kind: PageKind) {
        let links = discover_links(doc, kind);
        let mut state = self.state.lock().unwrap();

        let mut accepted = 0usize;
        for (url, hint) in links {
            if state.frontier.offer(url, Some(hint)) {
                accepted += 1;
            }
        }

        if accepted > 0 {
            tracing::debug!("Discovered {} new links on {}", accepted, doc.url());
        }
    }

    /// Extracts a candidate from a detail page and runs it through the
    /// pipeline, committing on acceptance
    ///
    /// The whole accept-append-snapshot sequence runs under one lock so the
    /// persisted file is never written for a record count it does not yet
    /// fully contain.
    fn extract_and_commit(&self, doc: &PageDoc) -> Result<()> {
        let mut state = self.state.lock().unwrap();

        // Candidates arriving after the limit was hit are ignored
        if state.report.committed_count() >= self.config.crawler.record_limit {
            return Ok(());
        }

        let Some(candidate) = extract_candidate(doc) else {
            tracing::debug!("No name extractable from {}", doc.url());
            state.report.extraction_missed += 1;
            return Ok(());
        };
        state.report.candidates_extracted += 1;

        match state.pipeline.process(candidate) {
            Ok(record) => {
                state.report.records.push(record.clone());
                self.snapshot.write(&state.report.records)?;

                let count = state.report.committed_count();
                tracing::info!("Character #{}: {} ({})", count, record.name, record.source_url);

                if count >= self.config.crawler.record_limit {
                    tracing::info!("Record limit reached, stopping frontier");
                    state.report.limit_reached = true;
                    state.frontier.stop();
                }
            }
            Err(reason) => {
                state.report.record_rejection(reason);
            }
        }

        Ok(())
    }

    /// Forces the final snapshot write and closes out the report
    fn finish(&mut self) -> Result<CrawlReport> {
        let mut state = self.state.lock().unwrap();

        self.snapshot.write(&state.report.records)?;
        state.report.finish();

        tracing::info!(
            "Crawl finished: {} records committed ({})",
            state.report.committed_count(),
            if state.report.limit_reached {
                "record limit reached"
            } else {
                "frontier exhausted"
            }
        );

        Ok(state.report.clone())
    }
}

/// Runs a full crawl with the given configuration and seed
///
/// This is the invocation surface consumed by the CLI and any external
/// facade: start a crawl with (seed, limit via config), get back the
/// committed record set or a structured fatal error.
pub async fn run_crawl(
    config: Config,
    seed: &str,
    config_hash: Option<String>,
) -> Result<CrawlReport> {
    let mut coordinator = Coordinator::new(config, seed, config_hash)?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_seed_never_starts() {
        let result = Coordinator::new(Config::default(), "example.com", None);
        assert!(matches!(
            result,
            Err(FandexError::InvalidSeedUrl { .. })
        ));
    }

    #[test]
    fn test_seed_normalized_on_construction() {
        let mut config = Config::default();
        config.output.data_dir = std::env::temp_dir()
            .join("fandex-coordinator-test")
            .display()
            .to_string();

        let coordinator =
            Coordinator::new(config, "leagueoflegends.fandom.com", None).unwrap();
        assert_eq!(
            coordinator.seed().as_str(),
            "https://leagueoflegends.fandom.com/"
        );
        assert!(coordinator
            .snapshot_path()
            .ends_with("leagueoflegends_characters.json"));
    }
}
