//! # aegis-engine — Stateful services for the Aegis onboarding risk engine.
//!
//! The shared mutable state behind the pure evaluator: the OTP ledger,
//! velocity tracker, domain cluster tracker, case ledger, and audit log,
//! each an explicitly owned service object constructed once at process
//! start. [`OnboardingService`] composes them into the narrow call contract
//! an external transport layer wires to its endpoints.
//!
//! Every operation is a short synchronous critical section with no I/O;
//! per-key counters use sharded-map atomic read-modify-write so concurrent
//! updates are never lost.

pub mod analytics;
pub mod audit;
pub mod cases;
pub mod domain;
pub mod otp;
pub mod service;
pub mod velocity;

pub use analytics::{AnalyticsSummary, summarize};
pub use audit::AuditLog;
pub use cases::{CaseAction, CaseLedger};
pub use domain::{DomainClusterTracker, normalize_domain};
pub use otp::{OtpCode, OtpDelivery, OtpLedger, TracingDelivery, VerifyResult};
pub use service::{OnboardingService, SubmissionReceipt, Verification};
pub use velocity::VelocityTracker;
