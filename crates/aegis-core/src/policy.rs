//! Deployment-tunable policy data.
//!
//! The blacklisted-ID set and the low-risk-country set are the two pieces of
//! policy a deployment changes without code changes, so they are injected
//! into the evaluator rather than read from constants. The defaults
//! reproduce the shipped configuration.

use std::collections::HashSet;

use crate::constants::{DEFAULT_BLACKLISTED_IDS, DEFAULT_LOW_RISK_COUNTRIES};

/// Policy inputs to the risk evaluator.
#[derive(Debug, Clone)]
pub struct RiskPolicy {
    blacklisted_ids: HashSet<String>,
    low_risk_countries: HashSet<String>,
}

impl RiskPolicy {
    /// Build a policy from explicit sets. Countries are normalized to
    /// lowercase so lookups match the evaluator's normalized input.
    pub fn new(
        blacklisted_ids: impl IntoIterator<Item = String>,
        low_risk_countries: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            blacklisted_ids: blacklisted_ids.into_iter().collect(),
            low_risk_countries: low_risk_countries
                .into_iter()
                .map(|c| c.to_lowercase())
                .collect(),
        }
    }

    /// Whether an identification number (trimmed) is blacklisted.
    pub fn is_blacklisted_id(&self, id_number: &str) -> bool {
        self.blacklisted_ids.contains(id_number)
    }

    /// Whether a lowercased country name is in the low-risk set.
    pub fn is_low_risk_country(&self, country: &str) -> bool {
        self.low_risk_countries.contains(country)
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_BLACKLISTED_IDS.iter().map(|s| s.to_string()),
            DEFAULT_LOW_RISK_COUNTRIES.iter().map(|s| s.to_string()),
        )
    }
}

/// Policy knobs for the OTP ledger.
#[derive(Debug, Clone)]
pub struct OtpPolicy {
    /// Keep an identity's failed-attempt count when a fresh code is issued.
    ///
    /// The shipped behaviour: a legitimate user who requests a new code
    /// inherits their stale failure count toward the OTP-failure signal.
    /// Set to `false` to clear the counter on every issue.
    pub retain_attempts_on_reissue: bool,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self { retain_attempts_on_reissue: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blacklist_matches_shipped_ids() {
        let policy = RiskPolicy::default();
        assert!(policy.is_blacklisted_id("AAAA123456"));
        assert!(policy.is_blacklisted_id("BBBB654321"));
        assert!(!policy.is_blacklisted_id("1234567890"));
    }

    #[test]
    fn default_low_risk_countries() {
        let policy = RiskPolicy::default();
        assert!(policy.is_low_risk_country("india"));
        assert!(policy.is_low_risk_country("usa"));
        assert!(policy.is_low_risk_country("uk"));
        assert!(!policy.is_low_risk_country("atlantis"));
    }

    #[test]
    fn custom_countries_are_lowercased() {
        let policy = RiskPolicy::new(
            std::iter::empty(),
            ["Germany".to_string(), "JAPAN".to_string()],
        );
        // Lookups use the evaluator's lowercased country.
        assert!(policy.is_low_risk_country("germany"));
        assert!(policy.is_low_risk_country("japan"));
        assert!(!policy.is_low_risk_country("india"));
    }

    #[test]
    fn custom_blacklist_is_exact_match() {
        let policy = RiskPolicy::new(["XX00000000".to_string()], std::iter::empty());
        assert!(policy.is_blacklisted_id("XX00000000"));
        // IDs are compared verbatim, not case-folded.
        assert!(!policy.is_blacklisted_id("xx00000000"));
    }

    #[test]
    fn otp_policy_retains_attempts_by_default() {
        assert!(OtpPolicy::default().retain_attempts_on_reissue);
    }
}
