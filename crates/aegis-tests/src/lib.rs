//! Shared helpers for the Aegis end-to-end and adversarial test suites.

pub mod helpers;
