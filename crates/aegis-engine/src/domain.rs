//! Per-domain submission counting for the clustering signal.
//!
//! Counts profile submissions per normalized email domain. Counts only ever
//! increase and live for the process lifetime; the clustering signal reads
//! them through [`DomainClusterTracker::count`].

use dashmap::DashMap;
use tracing::debug;

/// The normalized domain of an email: the lowercased suffix after the last
/// `@`, or the whole lowercased string when there is no `@`.
pub fn normalize_domain(email: &str) -> String {
    email
        .rsplit('@')
        .next()
        .unwrap_or(email)
        .to_lowercase()
}

/// Monotonic per-domain submission counters.
#[derive(Default)]
pub struct DomainClusterTracker {
    /// Entry API keeps increments atomic per key under concurrent submits.
    counts: DashMap<String, u64>,
}

impl DomainClusterTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a domain's count and return the new value. The domain is
    /// lowercased so mixed-case submissions land on the same counter.
    pub fn increment(&self, domain: &str) -> u64 {
        let mut entry = self.counts.entry(domain.to_lowercase()).or_insert(0);
        *entry += 1;
        let count = *entry;
        drop(entry);
        debug!(%domain, count, "domain: submission counted");
        count
    }

    /// Current count for a domain (0 if unseen).
    pub fn count(&self, domain: &str) -> u64 {
        self.counts
            .get(&domain.to_lowercase())
            .map(|v| *v)
            .unwrap_or(0)
    }
}
