//! Crawl frontier and visited set
//!
//! FIFO queue of pending crawl tasks with claim-before-dispatch visited
//! tracking: a URL joins the visited set the moment it is accepted, so two
//! pages discovering the same link can never double-enqueue it. The visited
//! set lives and dies with one crawl run.

use crate::page::PageKind;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A pending unit of crawl work
#[derive(Debug, Clone)]
pub struct CrawlTask {
    /// Absolute URL to fetch
    pub url: Url,

    /// Likely kind of the page, carried from link discovery
    pub hint: Option<PageKind>,
}

/// FIFO task queue scoped to one crawl run
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<CrawlTask>,
    visited: HashSet<String>,
    /// Host the crawl is confined to (the seed's host)
    host: String,
    stopped: bool,
}

impl Frontier {
    /// Creates an empty frontier confined to the seed's host
    pub fn new(seed: &Url) -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            host: seed.host_str().unwrap_or_default().to_string(),
            stopped: false,
        }
    }

    /// Offers a URL for crawling
    ///
    /// Enqueues iff the frontier is running, the URL is http(s) on the
    /// crawl host, and it has not been seen before. Accepting a URL marks
    /// it visited in the same operation. Returns whether it was enqueued.
    ///
    /// Callers must resolve relative links before offering; the frontier
    /// only ever stores absolute URLs.
    pub fn offer(&mut self, url: Url, hint: Option<PageKind>) -> bool {
        if self.stopped {
            return false;
        }

        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        if url.host_str() != Some(self.host.as_str()) {
            return false;
        }

        // Claim before dispatch: insert returns false if already visited
        if !self.visited.insert(url.as_str().to_string()) {
            return false;
        }

        self.queue.push_back(CrawlTask { url, hint });
        true
    }

    /// Dequeues the next task in discovery order
    pub fn next(&mut self) -> Option<CrawlTask> {
        self.queue.pop_front()
    }

    /// Drains the queue and refuses all further offers
    pub fn stop(&mut self) {
        self.stopped = true;
        self.queue.clear();
    }

    /// Returns true once [`stop`](Self::stop) has been called
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if no tasks are queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs ever accepted
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
