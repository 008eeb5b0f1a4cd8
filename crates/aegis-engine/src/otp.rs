//! One-time-passcode ledger.
//!
//! Issues and verifies six-digit codes per identity and tracks failed
//! attempts. Counters are keyed by email and live for the process lifetime;
//! by default they survive re-issues (see
//! [`OtpPolicy::retain_attempts_on_reissue`]).
//!
//! Verification never clears the outstanding code or the counter — callers
//! that want one-time-use semantics call [`OtpLedger::invalidate`] after a
//! successful verify.

use dashmap::DashMap;
use rand::Rng;
use std::fmt;
use tracing::debug;

use aegis_core::constants::{OTP_CODE_MAX, OTP_CODE_MIN};
use aegis_core::error::InputError;
use aegis_core::policy::OtpPolicy;

/// A six-digit numeric one-time code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a code uniformly over `[100000, 999999]`.
    pub fn generate() -> Self {
        let n = rand::thread_rng().gen_range(OTP_CODE_MIN..=OTP_CODE_MAX);
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyResult {
    /// Whether the submitted code matched the outstanding one.
    pub success: bool,
    /// The identity's failed-attempt count after this call. On success the
    /// count is reported unchanged.
    pub attempts: u64,
}

/// Seam through which issued codes reach the applicant.
///
/// The facade never returns codes in its responses; delivery is the only
/// way out. Tests substitute a capturing implementation.
pub trait OtpDelivery: Send + Sync {
    fn deliver(&self, email: &str, code: &OtpCode);
}

/// Default delivery: logs the issued code, standing in for a real
/// mail/SMS gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDelivery;

impl OtpDelivery for TracingDelivery {
    fn deliver(&self, email: &str, code: &OtpCode) {
        tracing::info!(%email, %code, "otp: code issued");
    }
}

/// Per-identity code store and failed-attempt counters.
pub struct OtpLedger {
    policy: OtpPolicy,
    /// Outstanding code per email; replaced wholesale on each issue.
    codes: DashMap<String, OtpCode>,
    /// Failed-attempt count per email. Entry API keeps increments atomic
    /// per key, so concurrent failed verifies are never lost.
    attempts: DashMap<String, u64>,
}

impl OtpLedger {
    pub fn new(policy: OtpPolicy) -> Self {
        Self {
            policy,
            codes: DashMap::new(),
            attempts: DashMap::new(),
        }
    }

    /// Create a ledger with the default policy (attempts retained on
    /// re-issue).
    pub fn with_defaults() -> Self {
        Self::new(OtpPolicy::default())
    }

    /// Issue a fresh code for an identity, replacing any outstanding one.
    ///
    /// Rejects an empty email before any state mutation. Does not touch the
    /// attempt counter unless the reset policy is enabled.
    pub fn issue(&self, email: &str) -> Result<OtpCode, InputError> {
        if email.is_empty() {
            return Err(InputError::MissingEmail);
        }

        let code = OtpCode::generate();
        self.codes.insert(email.to_string(), code.clone());

        if !self.policy.retain_attempts_on_reissue {
            self.attempts.remove(email);
        }

        debug!(%email, "otp: code stored");
        Ok(code)
    }

    /// Compare a submitted code against the outstanding one.
    ///
    /// A missing outstanding code compares as a mismatch, not an error.
    /// Every mismatch increments the identity's counter and reports the
    /// updated count; a match reports the current count and leaves both the
    /// code and the counter in place.
    pub fn verify(&self, email: &str, submitted: &str) -> VerifyResult {
        let matched = self
            .codes
            .get(email)
            .is_some_and(|code| code.as_str() == submitted);

        if matched {
            return VerifyResult { success: true, attempts: self.attempts(email) };
        }

        let attempts = {
            let mut entry = self.attempts.entry(email.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };
        debug!(%email, attempts, "otp: verification failed");
        VerifyResult { success: false, attempts }
    }

    /// The identity's current failed-attempt count (0 if unseen).
    pub fn attempts(&self, email: &str) -> u64 {
        self.attempts.get(email).map(|v| *v).unwrap_or(0)
    }

    /// Clear the outstanding code for an identity. Returns whether one
    /// existed. The attempt counter is untouched.
    pub fn invalidate(&self, email: &str) -> bool {
        let removed = self.codes.remove(email).is_some();
        if removed {
            debug!(%email, "otp: code invalidated");
        }
        removed
    }
}
