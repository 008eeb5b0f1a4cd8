//! Onboarding service composition.
//!
//! [`OnboardingService`] wires the profile store, OTP ledger, velocity and
//! domain trackers, case ledger, and audit log into the narrow call
//! contract a transport layer exposes as endpoints. Construct one at
//! process start and hand shared references into request handlers; every
//! operation takes `&self`.

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use aegis_core::constants::VELOCITY_WINDOW;
use aegis_core::error::{CaseError, InputError};
use aegis_core::policy::{OtpPolicy, RiskPolicy};
use aegis_core::types::{AccountStatus, AuditEntry, EscalatedCase, Profile, RiskAssessment};
use aegis_risk::{TrackerReadings, evaluate};

use crate::analytics::{AnalyticsSummary, summarize};
use crate::audit::AuditLog;
use crate::cases::{CaseAction, CaseLedger, initial_review_status};
use crate::domain::{DomainClusterTracker, normalize_domain};
use crate::otp::{OtpDelivery, OtpLedger, TracingDelivery};
use crate::velocity::VelocityTracker;

/// Marker returned to the submitter. The issued code travels through the
/// delivery seam, never through this receipt.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    OtpSent,
}

/// Response to a profile submission.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub email: String,
    pub status: SubmissionStatus,
}

/// Outcome of presenting an OTP for verification.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    /// The code did not match. Nothing was evaluated; no case or audit
    /// entry was written.
    Failed {
        /// The identity's failed-attempt count after this call.
        attempts: u64,
    },
    /// The code matched and the full evaluation pipeline ran.
    Evaluated {
        assessment: RiskAssessment,
        audit: AuditEntry,
    },
}

/// The onboarding risk engine's composition root.
pub struct OnboardingService {
    risk_policy: RiskPolicy,
    profiles: DashMap<String, Profile>,
    otp: OtpLedger,
    delivery: Arc<dyn OtpDelivery>,
    velocity: VelocityTracker,
    domains: DomainClusterTracker,
    cases: CaseLedger,
    audit: AuditLog,
}

impl OnboardingService {
    /// Compose a service from policy and a code-delivery channel.
    pub fn new(
        risk_policy: RiskPolicy,
        otp_policy: OtpPolicy,
        delivery: Arc<dyn OtpDelivery>,
    ) -> Self {
        Self {
            risk_policy,
            profiles: DashMap::new(),
            otp: OtpLedger::new(otp_policy),
            delivery,
            velocity: VelocityTracker::with_defaults(),
            domains: DomainClusterTracker::new(),
            cases: CaseLedger::new(),
            audit: AuditLog::new(),
        }
    }

    /// Default policies, codes delivered to the log.
    pub fn with_defaults() -> Self {
        Self::new(
            RiskPolicy::default(),
            OtpPolicy::default(),
            Arc::new(TracingDelivery),
        )
    }

    /// Accept a profile submission: store the profile (last-write-wins by
    /// email), issue and deliver an OTP, record the submission timestamp,
    /// and count the email domain.
    ///
    /// An absent or empty email is rejected before any state mutation.
    pub fn submit_profile(
        &self,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> Result<SubmissionReceipt, InputError> {
        let profile = Profile::from_fields(fields)?;
        let email = profile.email.clone();

        self.profiles.insert(email.clone(), profile);
        let code = self.otp.issue(&email)?;
        self.delivery.deliver(&email, &code);

        self.velocity.record(Instant::now());
        let domain = normalize_domain(&email);
        self.domains.increment(&domain);

        info!(%email, %domain, "onboarding: profile submitted, otp issued");
        Ok(SubmissionReceipt { email, status: SubmissionStatus::OtpSent })
    }

    /// Verify a presented code; on success run the full evaluation
    /// pipeline.
    ///
    /// On mismatch, the only side effect is the attempt-counter increment
    /// reported back in the result. On match: the evaluator reads the
    /// trackers and the stored profile (an identity with no stored profile
    /// evaluates as an empty one), escalating tiers write their case, and
    /// exactly one audit entry is appended.
    pub fn verify_otp_and_evaluate(&self, email: &str, code: &str) -> Verification {
        let result = self.otp.verify(email, code);
        if !result.success {
            return Verification::Failed { attempts: result.attempts };
        }

        let profile = self
            .profiles
            .get(email)
            .map(|p| p.clone())
            .unwrap_or_else(|| Profile::empty(email));

        let readings = TrackerReadings {
            otp_attempts: result.attempts,
            domain_count: self.domains.count(&normalize_domain(email)),
            recent_velocity: self.velocity.count_within(Instant::now(), VELOCITY_WINDOW),
        };
        let assessment = evaluate(&profile, readings, &self.risk_policy);

        if let Some(review_status) = initial_review_status(assessment.tier) {
            self.cases.upsert(email, assessment.clone(), review_status);
        }

        let entry = AuditEntry::from_assessment(email, &assessment, Utc::now());
        self.audit.append(entry.clone());

        info!(
            %email,
            score = assessment.score,
            decision = %assessment.decision,
            "onboarding: evaluation recorded"
        );
        Verification::Evaluated { assessment, audit: entry }
    }

    /// Snapshot of every escalated case.
    pub fn escalated_cases(&self) -> HashMap<String, EscalatedCase> {
        self.cases.list_all()
    }

    /// Apply an admin decision to an escalated case.
    pub fn decide_case(
        &self,
        email: &str,
        action: &CaseAction,
    ) -> Result<AccountStatus, CaseError> {
        self.cases.apply_decision(email, action)
    }

    /// The audit trail in append order.
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.all()
    }

    /// Summary statistics over the audit trail.
    pub fn analytics(&self) -> AnalyticsSummary {
        summarize(&self.audit.all())
    }

    /// The stored profile for an identity, if any.
    pub fn profile(&self, email: &str) -> Option<Profile> {
        self.profiles.get(email).map(|p| p.clone())
    }
}
