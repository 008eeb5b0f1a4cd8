//! The fixed signal checklist.
//!
//! Each signal is a named boolean check contributing a fixed point value to
//! the aggregate score. [`CHECKLIST`] is evaluated in order by the
//! evaluator; the order is part of the contract because signal labels are
//! collected into the assessment in checklist order.

use aegis_core::constants::{
    DISPOSABLE_EMAIL_MARKERS, DOMAIN_CLUSTER_THRESHOLD, ID_NUMBER_LEN, OTP_FAILURE_THRESHOLD,
    POINTS_BLACKLISTED_ID, POINTS_DISPOSABLE_EMAIL, POINTS_DOMAIN_CLUSTERING, POINTS_HIGH_RISK_GEO,
    POINTS_HIGH_VELOCITY, POINTS_INVALID_ID, POINTS_OTP_FAILURES, POINTS_SANCTIONS_MATCH,
    SANCTIONED_NAMES, VELOCITY_LIMIT,
};
use aegis_core::policy::RiskPolicy;

/// Normalized inputs shared by every check.
///
/// The evaluator normalizes once (trim, lowercase) so the predicates stay
/// simple comparisons.
#[derive(Debug, Clone, Copy)]
pub struct SignalInput<'a> {
    /// Lowercased email.
    pub email: &'a str,
    /// Trimmed, lowercased display name.
    pub name: &'a str,
    /// Trimmed identification number, original case.
    pub id_number: &'a str,
    /// Trimmed, lowercased country.
    pub country: &'a str,
    /// Failed OTP attempts recorded for this identity.
    pub otp_attempts: u64,
    /// Submissions seen for this identity's email domain.
    pub domain_count: u64,
    /// Submissions across all identities in the trailing window.
    pub recent_velocity: usize,
}

/// One entry of the checklist: label, weight, and predicate.
pub struct SignalCheck {
    /// Label collected into the assessment when the check fires.
    pub label: &'static str,
    /// Points added to the raw score when the check fires.
    pub points: u32,
    /// Whether firing marks the assessment as a suspicious behavioural
    /// pattern.
    pub suspicious: bool,
    applies: fn(&SignalInput<'_>, &RiskPolicy) -> bool,
}

impl SignalCheck {
    /// Run the predicate against normalized inputs.
    pub fn applies(&self, input: &SignalInput<'_>, policy: &RiskPolicy) -> bool {
        (self.applies)(input, policy)
    }
}

fn invalid_id_format(input: &SignalInput<'_>, _: &RiskPolicy) -> bool {
    input.id_number.len() != ID_NUMBER_LEN
}

fn blacklisted_id(input: &SignalInput<'_>, policy: &RiskPolicy) -> bool {
    policy.is_blacklisted_id(input.id_number)
}

fn sanctions_match(input: &SignalInput<'_>, _: &RiskPolicy) -> bool {
    SANCTIONED_NAMES.contains(&input.name)
}

fn disposable_email(input: &SignalInput<'_>, _: &RiskPolicy) -> bool {
    DISPOSABLE_EMAIL_MARKERS.iter().any(|m| input.email.contains(m))
}

fn high_risk_geography(input: &SignalInput<'_>, policy: &RiskPolicy) -> bool {
    !policy.is_low_risk_country(input.country)
}

fn domain_clustering(input: &SignalInput<'_>, _: &RiskPolicy) -> bool {
    input.domain_count > DOMAIN_CLUSTER_THRESHOLD
}

fn otp_failures(input: &SignalInput<'_>, _: &RiskPolicy) -> bool {
    input.otp_attempts > OTP_FAILURE_THRESHOLD
}

fn high_velocity(input: &SignalInput<'_>, _: &RiskPolicy) -> bool {
    input.recent_velocity > VELOCITY_LIMIT
}

/// The checklist, in evaluation order.
pub const CHECKLIST: &[SignalCheck] = &[
    SignalCheck {
        label: "Invalid ID format",
        points: POINTS_INVALID_ID,
        suspicious: false,
        applies: invalid_id_format,
    },
    SignalCheck {
        label: "Blacklisted ID detected",
        points: POINTS_BLACKLISTED_ID,
        suspicious: false,
        applies: blacklisted_id,
    },
    SignalCheck {
        label: "Sanctions match",
        points: POINTS_SANCTIONS_MATCH,
        suspicious: false,
        applies: sanctions_match,
    },
    SignalCheck {
        label: "Disposable email detected",
        points: POINTS_DISPOSABLE_EMAIL,
        suspicious: false,
        applies: disposable_email,
    },
    SignalCheck {
        label: "High-risk geography",
        points: POINTS_HIGH_RISK_GEO,
        suspicious: false,
        applies: high_risk_geography,
    },
    SignalCheck {
        label: "Domain clustering detected",
        points: POINTS_DOMAIN_CLUSTERING,
        suspicious: true,
        applies: domain_clustering,
    },
    SignalCheck {
        label: "Multiple OTP failures",
        points: POINTS_OTP_FAILURES,
        suspicious: true,
        applies: otp_failures,
    },
    SignalCheck {
        label: "High onboarding velocity detected",
        points: POINTS_HIGH_VELOCITY,
        suspicious: true,
        applies: high_velocity,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    /// A benign input that triggers no signal.
    fn clean_input() -> SignalInput<'static> {
        SignalInput {
            email: "alice@example.com",
            name: "alice",
            id_number: "1234567890",
            country: "india",
            otp_attempts: 0,
            domain_count: 1,
            recent_velocity: 1,
        }
    }

    fn fired_labels(input: &SignalInput<'_>) -> Vec<&'static str> {
        let policy = RiskPolicy::default();
        CHECKLIST
            .iter()
            .filter(|c| c.applies(input, &policy))
            .map(|c| c.label)
            .collect()
    }

    #[test]
    fn clean_input_fires_nothing() {
        assert!(fired_labels(&clean_input()).is_empty());
    }

    #[test]
    fn short_and_long_ids_are_invalid_format() {
        let mut input = clean_input();
        input.id_number = "123";
        assert_eq!(fired_labels(&input), vec!["Invalid ID format"]);
        input.id_number = "12345678901";
        assert_eq!(fired_labels(&input), vec!["Invalid ID format"]);
    }

    #[test]
    fn blacklisted_id_fires_alone_when_length_is_valid() {
        let mut input = clean_input();
        // Shipped blacklist entries are exactly ten characters, so the
        // format check stays quiet and only the blacklist check fires.
        input.id_number = "AAAA123456";
        assert_eq!(fired_labels(&input), vec!["Blacklisted ID detected"]);
    }

    #[test]
    fn sanctioned_names_match() {
        let mut input = clean_input();
        input.name = "fraud";
        assert_eq!(fired_labels(&input), vec!["Sanctions match"]);
        input.name = "blacklisted";
        assert_eq!(fired_labels(&input), vec!["Sanctions match"]);
    }

    #[test]
    fn disposable_email_markers() {
        let mut input = clean_input();
        input.email = "x@tempmail.com";
        assert_eq!(fired_labels(&input), vec!["Disposable email detected"]);
        input.email = "real.fake@example.com";
        assert_eq!(fired_labels(&input), vec!["Disposable email detected"]);
    }

    #[test]
    fn unknown_country_is_high_risk() {
        let mut input = clean_input();
        input.country = "atlantis";
        assert_eq!(fired_labels(&input), vec!["High-risk geography"]);
        // Empty country is outside the low-risk set too.
        input.country = "";
        assert_eq!(fired_labels(&input), vec!["High-risk geography"]);
    }

    #[test]
    fn behavioural_thresholds_are_strict() {
        let mut input = clean_input();
        input.domain_count = DOMAIN_CLUSTER_THRESHOLD;
        assert!(fired_labels(&input).is_empty(), "at threshold must not fire");
        input.domain_count = DOMAIN_CLUSTER_THRESHOLD + 1;
        assert_eq!(fired_labels(&input), vec!["Domain clustering detected"]);

        let mut input = clean_input();
        input.otp_attempts = OTP_FAILURE_THRESHOLD;
        assert!(fired_labels(&input).is_empty());
        input.otp_attempts = OTP_FAILURE_THRESHOLD + 1;
        assert_eq!(fired_labels(&input), vec!["Multiple OTP failures"]);

        let mut input = clean_input();
        input.recent_velocity = VELOCITY_LIMIT;
        assert!(fired_labels(&input).is_empty());
        input.recent_velocity = VELOCITY_LIMIT + 1;
        assert_eq!(fired_labels(&input), vec!["High onboarding velocity detected"]);
    }

    #[test]
    fn behavioural_signals_are_the_suspicious_ones() {
        let suspicious: Vec<&str> = CHECKLIST
            .iter()
            .filter(|c| c.suspicious)
            .map(|c| c.label)
            .collect();
        assert_eq!(
            suspicious,
            vec![
                "Domain clustering detected",
                "Multiple OTP failures",
                "High onboarding velocity detected",
            ]
        );
    }

    #[test]
    fn checklist_labels_are_unique() {
        let mut labels: Vec<&str> = CHECKLIST.iter().map(|c| c.label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), CHECKLIST.len());
    }
}
