//! Core domain types: profiles, assessments, escalated cases, audit entries.
//!
//! All types are plain serializable values. The external transport layer owns
//! wire formats; nothing here prescribes one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{LOW_TIER_MAX, MEDIUM_TIER_MAX, FRAUD_ALERT};
use crate::error::InputError;

/// A submitted applicant profile, keyed by email.
///
/// Built from an arbitrary field map; the known fields are pulled out and
/// everything else is retained verbatim in `extra`. Missing or non-string
/// known fields normalize to empty strings — the evaluator folds them into
/// scoring instead of erroring. Re-submission overwrites by email key
/// (last-write-wins, no merge).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Profile {
    /// Identity key.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Identification-number string (illustrative document check input).
    pub id_number: String,
    /// Declared country of residence.
    pub country: String,
    /// Any additional submitted fields, kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    /// Build a profile from a submitted field map.
    ///
    /// `email` must be present and non-empty; everything else is optional.
    /// Unknown fields land in `extra`.
    pub fn from_fields(
        mut fields: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, InputError> {
        let email = match fields.remove("email") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s,
            _ => return Err(InputError::MissingEmail),
        };

        let mut take = |key: &str| match fields.remove(key) {
            Some(serde_json::Value::String(s)) => s,
            _ => String::new(),
        };
        let name = take("name");
        let id_number = take("id_number");
        let country = take("country");

        Ok(Self { email, name, id_number, country, extra: fields })
    }

    /// A profile with every field empty except the email key.
    ///
    /// Used when an evaluation runs for an identity whose profile was never
    /// stored; the empty fields then score through the normal signals.
    pub fn empty(email: &str) -> Self {
        Self { email: email.to_string(), ..Self::default() }
    }
}

/// Risk classification derived from the clamped score.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Classify a clamped score. Total over all scores: `..=40` is LOW,
    /// `41..=70` is MEDIUM, everything above is HIGH.
    pub fn for_score(score: u32) -> Self {
        if score <= LOW_TIER_MAX {
            Self::Low
        } else if score <= MEDIUM_TIER_MAX {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// The routing decision this tier implies.
    pub fn decision(&self) -> Decision {
        match self {
            Self::Low => Decision::Approved,
            Self::Medium => Decision::EddRequired,
            Self::High => Decision::Blocked,
        }
    }

    /// The account status this tier implies.
    pub fn account_status(&self) -> AccountStatus {
        match self {
            Self::Low => AccountStatus::Activated,
            Self::Medium => AccountStatus::Pending,
            Self::High => AccountStatus::Blocked,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// Routing decision for an evaluated application.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    #[serde(rename = "APPROVED")]
    Approved,
    #[serde(rename = "EDD REQUIRED")]
    EddRequired,
    #[serde(rename = "HIGH RISK - BLOCKED")]
    Blocked,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Approved => "APPROVED",
            Self::EddRequired => "EDD REQUIRED",
            Self::Blocked => "HIGH RISK - BLOCKED",
        };
        f.write_str(s)
    }
}

/// Final (or provisional) account status.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Activated,
    Pending,
    Blocked,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Activated => "activated",
            Self::Pending => "pending",
            Self::Blocked => "blocked",
        };
        f.write_str(s)
    }
}

/// The immutable output of one risk evaluation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RiskAssessment {
    /// Aggregate risk score, clamped to `[0, 100]`.
    pub score: u32,
    /// `100 - score`, always.
    pub trust_index: u32,
    /// Tier derived from the clamped score.
    pub tier: RiskTier,
    /// Routing decision derived from the tier.
    pub decision: Decision,
    /// Account status derived from the tier.
    pub account_status: AccountStatus,
    /// `max(50, 100 - score / 2)` with integer division.
    pub confidence: u32,
    /// Labels of every triggered signal, in checklist order.
    pub signals: Vec<String>,
    /// Set when any behavioural-pattern signal fired (clustering, OTP
    /// failures, velocity).
    pub suspicious: bool,
    /// Human-readable explanation of the outcome.
    pub explanation: String,
}

impl RiskAssessment {
    /// Alert text for suspicious assessments, `None` otherwise.
    pub fn fraud_alert(&self) -> Option<&'static str> {
        self.suspicious.then_some(FRAUD_ALERT)
    }
}

/// A persisted record requiring human compliance action.
///
/// One case per email at a time; a later escalation for the same email
/// overwrites the prior case entirely.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EscalatedCase {
    /// Identity the case concerns.
    pub email: String,
    /// Snapshot of the assessment that triggered the escalation.
    pub assessment: RiskAssessment,
    /// Review state: an initial per-tier string, later overwritten by the
    /// literal admin action.
    pub review_status: String,
    /// When the case was opened.
    pub opened_at: DateTime<Utc>,
}

/// Append-only record of one completed evaluation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub trust_index: u32,
    pub tier: RiskTier,
    pub decision: Decision,
    pub signals: Vec<String>,
}

impl AuditEntry {
    /// Record an assessment outcome for the audit trail.
    pub fn from_assessment(email: &str, assessment: &RiskAssessment, at: DateTime<Utc>) -> Self {
        Self {
            email: email.to_string(),
            timestamp: at,
            score: assessment.score,
            trust_index: assessment.trust_index,
            tier: assessment.tier,
            decision: assessment.decision,
            signals: assessment.signals.clone(),
        }
    }
}
