//! On-demand summaries of the audit trail.

use serde::{Deserialize, Serialize};

use aegis_core::types::{AuditEntry, Decision, RiskTier};

/// Aggregate view of evaluation outcomes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalyticsSummary {
    /// Number of completed evaluations.
    pub total: usize,
    /// Evaluations that ended in automatic approval.
    pub approved: usize,
    /// Evaluations classified MEDIUM.
    pub medium_risk: usize,
    /// Evaluations classified HIGH.
    pub high_risk: usize,
    /// Mean risk score rounded to two decimal places; 0 when the log is
    /// empty.
    pub average_score: f64,
}

/// Summarize an audit-log snapshot. Pure O(n) scan.
pub fn summarize(entries: &[AuditEntry]) -> AnalyticsSummary {
    let total = entries.len();
    if total == 0 {
        return AnalyticsSummary {
            total: 0,
            approved: 0,
            medium_risk: 0,
            high_risk: 0,
            average_score: 0.0,
        };
    }

    let approved = entries.iter().filter(|e| e.decision == Decision::Approved).count();
    let medium_risk = entries.iter().filter(|e| e.tier == RiskTier::Medium).count();
    let high_risk = entries.iter().filter(|e| e.tier == RiskTier::High).count();

    let sum: u64 = entries.iter().map(|e| u64::from(e.score)).sum();
    let average_score = ((sum as f64 / total as f64) * 100.0).round() / 100.0;

    AnalyticsSummary { total, approved, medium_risk, high_risk, average_score }
}
