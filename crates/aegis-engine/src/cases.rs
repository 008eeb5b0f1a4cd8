//! Escalated-case ledger and the admin decision transition.
//!
//! Cases pending manual review or blocked awaiting a compliance decision,
//! keyed by email. One case per email at a time: a later escalation for the
//! same identity overwrites the prior case entirely. Upsert and decision
//! run under the write lock, so a decision reported as applied is visible
//! to every subsequent read.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{info, warn};

use aegis_core::error::CaseError;
use aegis_core::types::{AccountStatus, EscalatedCase, RiskAssessment, RiskTier};

/// Review status a MEDIUM-tier case opens with.
pub const UNDER_MANUAL_REVIEW: &str = "Under Manual Review";
/// Review status a HIGH-tier case opens with.
pub const AWAITING_COMPLIANCE_DECISION: &str = "High Risk - Waiting Compliance Decision";

/// The review status a freshly escalated case starts with, or `None` for
/// tiers that do not escalate.
pub fn initial_review_status(tier: RiskTier) -> Option<&'static str> {
    match tier {
        RiskTier::Low => None,
        RiskTier::Medium => Some(UNDER_MANUAL_REVIEW),
        RiskTier::High => Some(AWAITING_COMPLIANCE_DECISION),
    }
}

/// An admin decision on an escalated case.
///
/// Only the literal action `"Approved"` activates the account; any other
/// action string blocks it. Keeping the two-valued split at the boundary
/// stops typos from silently mapping to a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseAction {
    Approved,
    Other(String),
}

impl CaseAction {
    /// Classify a free-form action string.
    pub fn parse(action: &str) -> Self {
        if action == "Approved" {
            Self::Approved
        } else {
            Self::Other(action.to_string())
        }
    }

    /// The literal string persisted as the case's review status.
    pub fn as_status(&self) -> &str {
        match self {
            Self::Approved => "Approved",
            Self::Other(s) => s,
        }
    }

    /// The account status this action resolves to.
    pub fn final_status(&self) -> AccountStatus {
        match self {
            Self::Approved => AccountStatus::Activated,
            Self::Other(_) => AccountStatus::Blocked,
        }
    }
}

/// Keyed store of escalated cases.
#[derive(Default)]
pub struct CaseLedger {
    cases: RwLock<HashMap<String, EscalatedCase>>,
}

impl CaseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an escalation, overwriting any existing case for the email.
    pub fn upsert(&self, email: &str, assessment: RiskAssessment, review_status: &str) {
        warn!(
            %email,
            tier = %assessment.tier,
            score = assessment.score,
            review_status,
            "cases: escalated"
        );
        let case = EscalatedCase {
            email: email.to_string(),
            assessment,
            review_status: review_status.to_string(),
            opened_at: Utc::now(),
        };
        self.cases.write().insert(email.to_string(), case);
    }

    /// The current case for an email, if any.
    pub fn get(&self, email: &str) -> Option<EscalatedCase> {
        self.cases.read().get(email).cloned()
    }

    /// Snapshot of every open case.
    pub fn list_all(&self) -> HashMap<String, EscalatedCase> {
        self.cases.read().clone()
    }

    /// Apply an admin decision to an existing case.
    ///
    /// Persists the action's literal string as the review status and
    /// returns the resolved account status. The read-modify-write runs
    /// under the write lock, so decisions for the same email serialize.
    pub fn apply_decision(
        &self,
        email: &str,
        action: &CaseAction,
    ) -> Result<AccountStatus, CaseError> {
        let mut cases = self.cases.write();
        let case = cases
            .get_mut(email)
            .ok_or_else(|| CaseError::NotFound(email.to_string()))?;

        case.review_status = action.as_status().to_string();
        let final_status = action.final_status();
        info!(%email, review_status = action.as_status(), %final_status, "cases: decision applied");
        Ok(final_status)
    }

    pub fn len(&self) -> usize {
        self.cases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.read().is_empty()
    }
}
