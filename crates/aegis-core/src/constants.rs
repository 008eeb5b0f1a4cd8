//! Scoring and policy constants. All scores are points on a 0–100 scale.

use std::time::Duration;

/// Maximum risk score; sums above this are clamped.
pub const SCORE_CAP: u32 = 100;

/// Upper bound (inclusive) of the LOW tier.
pub const LOW_TIER_MAX: u32 = 40;
/// Upper bound (inclusive) of the MEDIUM tier. Scores above are HIGH.
pub const MEDIUM_TIER_MAX: u32 = 70;

/// Floor for the confidence score regardless of risk.
pub const MIN_CONFIDENCE: u32 = 50;

// Signal point values. Independent and additive; the evaluator clamps the sum.
pub const POINTS_INVALID_ID: u32 = 25;
pub const POINTS_BLACKLISTED_ID: u32 = 60;
pub const POINTS_SANCTIONS_MATCH: u32 = 50;
pub const POINTS_DISPOSABLE_EMAIL: u32 = 20;
pub const POINTS_HIGH_RISK_GEO: u32 = 25;
pub const POINTS_DOMAIN_CLUSTERING: u32 = 25;
pub const POINTS_OTP_FAILURES: u32 = 30;
pub const POINTS_HIGH_VELOCITY: u32 = 30;

/// Expected length of a well-formed identification number, after trimming.
pub const ID_NUMBER_LEN: usize = 10;

/// Domain clustering fires when a domain's submission count exceeds this.
pub const DOMAIN_CLUSTER_THRESHOLD: u64 = 3;
/// The OTP-failure signal fires when an identity's failed attempts exceed this.
pub const OTP_FAILURE_THRESHOLD: u64 = 3;
/// The velocity signal fires when submissions in the trailing window exceed this.
pub const VELOCITY_LIMIT: usize = 5;
/// The trailing window consulted for the velocity signal.
pub const VELOCITY_WINDOW: Duration = Duration::from_secs(60);

/// Inclusive range for generated one-time codes (always six digits).
pub const OTP_CODE_MIN: u32 = 100_000;
pub const OTP_CODE_MAX: u32 = 999_999;

/// Display names matched by the sanctions check, lowercased.
pub const SANCTIONED_NAMES: &[&str] = &["fraud", "blacklisted"];

/// Substrings marking a disposable email provider, matched case-insensitively.
pub const DISPOSABLE_EMAIL_MARKERS: &[&str] = &["tempmail", "fake"];

/// Default identification-number blacklist. Deployments override via
/// [`RiskPolicy`](crate::policy::RiskPolicy).
pub const DEFAULT_BLACKLISTED_IDS: &[&str] = &["AAAA123456", "BBBB654321"];

/// Default low-risk country set, lowercased. Countries outside the set
/// contribute the geography signal.
pub const DEFAULT_LOW_RISK_COUNTRIES: &[&str] = &["india", "usa", "uk"];

/// Alert text attached to assessments with a suspicious behavioural pattern.
pub const FRAUD_ALERT: &str = "Suspicious behavioral pattern detected";
