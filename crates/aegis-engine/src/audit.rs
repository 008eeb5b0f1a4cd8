//! Append-only audit trail of evaluation outcomes.
//!
//! Entries are never mutated or deleted; their total order is append order.
//! Reads return detached snapshots, so consumers can iterate while writers
//! keep appending.

use parking_lot::RwLock;
use tracing::debug;

use aegis_core::types::AuditEntry;

/// Append-only in-memory audit log.
#[derive(Default)]
pub struct AuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. O(1); concurrent appends serialize on the write
    /// lock and are never dropped.
    pub fn append(&self, entry: AuditEntry) {
        let mut entries = self.entries.write();
        entries.push(entry);
        debug!(total = entries.len(), "audit: entry appended");
    }

    /// Snapshot of all entries in append order.
    pub fn all(&self) -> Vec<AuditEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::policy::RiskPolicy;
    use aegis_core::types::Profile;
    use aegis_risk::{TrackerReadings, evaluate};
    use chrono::Utc;

    fn entry_for(email: &str) -> AuditEntry {
        let assessment = evaluate(
            &Profile::empty(email),
            TrackerReadings::default(),
            &RiskPolicy::default(),
        );
        AuditEntry::from_assessment(email, &assessment, Utc::now())
    }

    #[test]
    fn append_preserves_order() {
        let log = AuditLog::new();
        log.append(entry_for("first@x.com"));
        log.append(entry_for("second@x.com"));
        log.append(entry_for("third@x.com"));

        let all = log.all();
        let emails: Vec<&str> = all.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, vec!["first@x.com", "second@x.com", "third@x.com"]);
    }

    #[test]
    fn reads_are_restartable_snapshots() {
        let log = AuditLog::new();
        log.append(entry_for("a@x.com"));

        let snapshot = log.all();
        log.append(entry_for("b@x.com"));

        // The earlier snapshot is unaffected, and a fresh read sees both.
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.all().len(), 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn starts_empty() {
        let log = AuditLog::new();
        assert!(log.is_empty());
        assert!(log.all().is_empty());
    }
}
