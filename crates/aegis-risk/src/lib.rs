//! # aegis-risk — Pure risk-scoring evaluator.
//!
//! A deterministic, total function from an applicant profile plus tracker
//! readings to a [`RiskAssessment`](aegis_core::types::RiskAssessment):
//! - **Fixed signal checklist**: an ordered table of independent additive
//!   checks, all evaluated on every run (no short-circuit), so signal
//!   ordering is deterministic and each check unit-testable.
//! - **Clamped scoring**: triggered points are summed then clamped to 100;
//!   the trust index is the complement.
//! - **Tier policy**: the clamped score alone decides tier, routing
//!   decision, and account status.
//!
//! Holds no state; the stateful trackers live in `aegis-engine` and hand
//! their current readings in via [`TrackerReadings`].

pub mod evaluator;
pub mod signal;

pub use evaluator::{TrackerReadings, evaluate};
pub use signal::{CHECKLIST, SignalCheck, SignalInput};
