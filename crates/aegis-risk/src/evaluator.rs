//! The risk evaluator: checklist → score → tier → decision.

use tracing::debug;

use aegis_core::constants::{MIN_CONFIDENCE, SCORE_CAP};
use aegis_core::policy::RiskPolicy;
use aegis_core::types::{Profile, RiskAssessment, RiskTier};

use crate::signal::{CHECKLIST, SignalInput};

/// Current readings of the stateful trackers, taken at evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerReadings {
    /// Failed OTP attempts recorded for this identity.
    pub otp_attempts: u64,
    /// Submission count for this identity's email domain.
    pub domain_count: u64,
    /// Submissions across all identities in the trailing window.
    pub recent_velocity: usize,
}

/// Evaluate a profile against the signal checklist.
///
/// Deterministic and total: identical inputs produce an identical
/// assessment, and malformed profile fields score as empty strings rather
/// than erroring. All checks run unconditionally; triggered labels are
/// collected in checklist order.
pub fn evaluate(
    profile: &Profile,
    readings: TrackerReadings,
    policy: &RiskPolicy,
) -> RiskAssessment {
    let email = profile.email.to_lowercase();
    let name = profile.name.trim().to_lowercase();
    let country = profile.country.trim().to_lowercase();
    let input = SignalInput {
        email: &email,
        name: &name,
        id_number: profile.id_number.trim(),
        country: &country,
        otp_attempts: readings.otp_attempts,
        domain_count: readings.domain_count,
        recent_velocity: readings.recent_velocity,
    };

    let mut raw_score: u32 = 0;
    let mut signals: Vec<String> = Vec::new();
    let mut suspicious = false;
    for check in CHECKLIST {
        if check.applies(&input, policy) {
            raw_score += check.points;
            signals.push(check.label.to_string());
            suspicious |= check.suspicious;
        }
    }

    let score = raw_score.min(SCORE_CAP);
    let trust_index = SCORE_CAP - score;
    let tier = RiskTier::for_score(score);
    let confidence = MIN_CONFIDENCE.max(SCORE_CAP - score / 2);

    let explanation = if signals.is_empty() {
        "All verification checks passed successfully.".to_string()
    } else {
        format!("Trust reduced due to: {}", signals.join(", "))
    };

    debug!(
        email = %profile.email,
        score,
        tier = %tier,
        signals = signals.len(),
        suspicious,
        "risk: evaluation complete"
    );

    RiskAssessment {
        score,
        trust_index,
        tier,
        decision: tier.decision(),
        account_status: tier.account_status(),
        confidence,
        signals,
        suspicious,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::types::{AccountStatus, Decision};
    use proptest::prelude::*;

    fn profile(email: &str, name: &str, id_number: &str, country: &str) -> Profile {
        Profile {
            email: email.to_string(),
            name: name.to_string(),
            id_number: id_number.to_string(),
            country: country.to_string(),
            ..Profile::default()
        }
    }

    fn clean_profile() -> Profile {
        profile("alice@example.com", "alice", "1234567890", "india")
    }

    #[test]
    fn clean_profile_is_approved() {
        let a = evaluate(&clean_profile(), TrackerReadings::default(), &RiskPolicy::default());
        assert_eq!(a.score, 0);
        assert_eq!(a.trust_index, 100);
        assert_eq!(a.tier, RiskTier::Low);
        assert_eq!(a.decision, Decision::Approved);
        assert_eq!(a.account_status, AccountStatus::Activated);
        assert_eq!(a.confidence, 100);
        assert!(a.signals.is_empty());
        assert!(!a.suspicious);
        assert_eq!(a.explanation, "All verification checks passed successfully.");
        assert_eq!(a.fraud_alert(), None);
    }

    #[test]
    fn disposable_email_scores_twenty_low() {
        let p = profile("user@tempmail.com", "alice", "1234567890", "india");
        let a = evaluate(&p, TrackerReadings::default(), &RiskPolicy::default());
        assert_eq!(a.signals, vec!["Disposable email detected"]);
        assert_eq!(a.score, 20);
        assert_eq!(a.trust_index, 80);
        assert_eq!(a.tier, RiskTier::Low);
        assert_eq!(a.decision, Decision::Approved);
    }

    #[test]
    fn blacklisted_id_scores_sixty_medium() {
        let p = profile("bob@corp.com", "bob", "AAAA123456", "india");
        let a = evaluate(&p, TrackerReadings::default(), &RiskPolicy::default());
        assert_eq!(a.signals, vec!["Blacklisted ID detected"]);
        assert_eq!(a.score, 60);
        assert_eq!(a.tier, RiskTier::Medium);
        assert_eq!(a.decision, Decision::EddRequired);
        assert_eq!(a.account_status, AccountStatus::Pending);
        assert_eq!(a.confidence, 70);
        assert_eq!(
            a.explanation,
            "Trust reduced due to: Blacklisted ID detected"
        );
    }

    #[test]
    fn stacked_signals_clamp_to_cap() {
        // Every signal fires: raw sum is 265, reported score must be 100.
        let p = profile("fraud@fakemail.io", "fraud", "short", "atlantis");
        let readings = TrackerReadings { otp_attempts: 10, domain_count: 10, recent_velocity: 10 };
        let a = evaluate(&p, readings, &RiskPolicy::default());
        assert_eq!(a.score, 100);
        assert_eq!(a.trust_index, 0);
        assert_eq!(a.tier, RiskTier::High);
        assert_eq!(a.decision, Decision::Blocked);
        assert_eq!(a.account_status, AccountStatus::Blocked);
        assert_eq!(a.confidence, 50);
        assert_eq!(a.signals.len(), CHECKLIST.len());
        assert!(a.suspicious);
        assert_eq!(a.fraud_alert(), Some("Suspicious behavioral pattern detected"));
    }

    #[test]
    fn signals_collected_in_checklist_order() {
        let p = profile("fraud@tempmail.com", "fraud", "nope", "nowhere");
        let a = evaluate(&p, TrackerReadings::default(), &RiskPolicy::default());
        assert_eq!(
            a.signals,
            vec![
                "Invalid ID format",
                "Sanctions match",
                "Disposable email detected",
                "High-risk geography",
            ]
        );
    }

    #[test]
    fn normalization_trims_and_lowercases() {
        // Mixed case and padding must not change the outcome.
        let p = profile("Alice@Example.COM", "  ALICE  ", " 1234567890 ", " India ");
        let a = evaluate(&p, TrackerReadings::default(), &RiskPolicy::default());
        assert_eq!(a.score, 0, "normalized clean profile must not fire signals");
    }

    #[test]
    fn missing_fields_score_as_empty_strings() {
        // Empty ID (wrong length) and empty country (not low-risk) both fire.
        let p = Profile::empty("ghost@example.com");
        let a = evaluate(&p, TrackerReadings::default(), &RiskPolicy::default());
        assert_eq!(a.signals, vec!["Invalid ID format", "High-risk geography"]);
        assert_eq!(a.score, 50);
        assert_eq!(a.tier, RiskTier::Medium);
    }

    #[test]
    fn custom_policy_replaces_defaults() {
        let policy = RiskPolicy::new(
            ["ZZZZ999999".to_string()],
            ["germany".to_string()],
        );
        let p = profile("eva@corp.de", "eva", "ZZZZ999999", "germany");
        let a = evaluate(&p, TrackerReadings::default(), &policy);
        assert_eq!(a.signals, vec!["Blacklisted ID detected"]);

        // The shipped blacklist entry is clean under the custom policy.
        let p = profile("eva@corp.de", "eva", "AAAA123456", "germany");
        let a = evaluate(&p, TrackerReadings::default(), &policy);
        assert!(a.signals.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let p = profile("user@tempmail.com", "fraud", "AAAA123456", "mars");
        let readings = TrackerReadings { otp_attempts: 5, domain_count: 4, recent_velocity: 9 };
        let policy = RiskPolicy::default();
        let first = evaluate(&p, readings, &policy);
        let second = evaluate(&p, readings, &policy);
        assert_eq!(first, second);
    }

    proptest! {
        /// Score stays in [0, 100] and the trust index is its complement,
        /// for arbitrary profiles and tracker readings.
        #[test]
        fn score_clamped_and_trust_is_complement(
            email in ".{0,30}",
            name in ".{0,20}",
            id_number in ".{0,20}",
            country in ".{0,20}",
            otp_attempts in 0u64..50,
            domain_count in 0u64..50,
            recent_velocity in 0usize..50,
        ) {
            let p = Profile {
                email, name, id_number, country,
                ..Profile::default()
            };
            let readings = TrackerReadings { otp_attempts, domain_count, recent_velocity };
            let a = evaluate(&p, readings, &RiskPolicy::default());
            prop_assert!(a.score <= 100);
            prop_assert_eq!(a.trust_index, 100 - a.score);
            prop_assert!(a.confidence >= 50 && a.confidence <= 100);
            // Tier, decision, and status always agree with the score.
            prop_assert_eq!(a.tier, RiskTier::for_score(a.score));
            prop_assert_eq!(a.decision, a.tier.decision());
            prop_assert_eq!(a.account_status, a.tier.account_status());
        }
    }
}
