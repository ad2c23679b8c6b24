//! Image validation cache
//!
//! Bounded cache of image-URL validation verdicts. Entries expire after a
//! TTL and are evicted least-recently-used once the capacity is reached. A
//! hit short-circuits re-validation of a URL the pipeline has already seen.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    accepted: bool,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.inserted_at) >= ttl
    }
}

/// Bounded TTL + LRU cache mapping image URLs to validation verdicts
#[derive(Debug)]
pub struct ImageValidationCache {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
    /// Recency order, least recently used at the front
    recency: VecDeque<String>,
}

impl ImageValidationCache {
    /// Creates a cache with the given capacity and entry TTL
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: HashMap::new(),
            recency: VecDeque::new(),
        }
    }

    /// Looks up the cached verdict for an image URL
    ///
    /// Returns None on miss or when the entry has expired (expired entries
    /// are removed). A hit refreshes the entry's recency.
    pub fn get(&mut self, url: &str) -> Option<bool> {
        let now = Instant::now();

        match self.entries.get(url) {
            Some(entry) if entry.is_expired(self.ttl, now) => {
                self.remove(url);
                None
            }
            Some(entry) => {
                let accepted = entry.accepted;
                self.touch(url);
                Some(accepted)
            }
            None => None,
        }
    }

    /// Inserts a verdict, evicting the least recently used entry if full
    pub fn insert(&mut self, url: &str, accepted: bool) {
        if self.entries.contains_key(url) {
            self.touch(url);
        } else {
            if self.entries.len() >= self.capacity {
                if let Some(oldest) = self.recency.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
            self.recency.push_back(url.to_string());
        }

        self.entries.insert(
            url.to_string(),
            CacheEntry {
                accepted,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, url: &str) {
        if let Some(pos) = self.recency.iter().position(|k| k == url) {
            self.recency.remove(pos);
            self.recency.push_back(url.to_string());
        }
    }

    fn remove(&mut self, url: &str) {
        self.entries.remove(url);
        if let Some(pos) = self.recency.iter().position(|k| k == url) {
            self.recency.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> ImageValidationCache {
        ImageValidationCache::new(capacity, Duration::from_secs(3600))
    }

    #[test]
    fn test_miss_then_hit() {
        let mut c = cache(10);
        assert_eq!(c.get("https://x/a.png"), None);

        c.insert("https://x/a.png", true);
        assert_eq!(c.get("https://x/a.png"), Some(true));
    }

    #[test]
    fn test_stores_negative_verdicts() {
        let mut c = cache(10);
        c.insert("https://x/bad", false);
        assert_eq!(c.get("https://x/bad"), Some(false));
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let mut c = cache(2);
        c.insert("a", true);
        c.insert("b", true);

        // Touch "a" so "b" is the LRU entry
        assert_eq!(c.get("a"), Some(true));

        c.insert("c", true);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get("b"), None);
        assert_eq!(c.get("a"), Some(true));
        assert_eq!(c.get("c"), Some(true));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let mut c = ImageValidationCache::new(10, Duration::ZERO);
        c.insert("a", true);
        assert_eq!(c.get("a"), None);
        assert!(c.is_empty());
    }

    #[test]
    fn test_reinsert_updates_verdict() {
        let mut c = cache(10);
        c.insert("a", true);
        c.insert("a", false);
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("a"), Some(false));
    }

    #[test]
    fn test_capacity_floor_of_one() {
        let mut c = ImageValidationCache::new(0, Duration::from_secs(60));
        c.insert("a", true);
        assert_eq!(c.get("a"), Some(true));
    }
}
