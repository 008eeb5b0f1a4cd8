//! Shared test helpers for E2E and adversarial tests.

use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use aegis_core::policy::{OtpPolicy, RiskPolicy};
use aegis_engine::{OnboardingService, OtpCode, OtpDelivery};

/// Opt-in log capture for debugging test runs (`RUST_LOG=debug`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Delivery double that records every issued code by email.
#[derive(Default)]
pub struct CaptureDelivery {
    codes: Mutex<HashMap<String, String>>,
}

impl CaptureDelivery {
    /// The most recently delivered code for an identity.
    ///
    /// Panics if no code was delivered; tests always submit first.
    pub fn code_for(&self, email: &str) -> String {
        self.codes
            .lock()
            .get(email)
            .cloned()
            .expect("no code delivered for email")
    }
}

impl OtpDelivery for CaptureDelivery {
    fn deliver(&self, email: &str, code: &OtpCode) {
        self.codes
            .lock()
            .insert(email.to_string(), code.as_str().to_string());
    }
}

/// A service with default policies and a capturing delivery channel.
pub fn service_with_capture() -> (Arc<OnboardingService>, Arc<CaptureDelivery>) {
    let delivery = Arc::new(CaptureDelivery::default());
    let service = Arc::new(OnboardingService::new(
        RiskPolicy::default(),
        OtpPolicy::default(),
        delivery.clone(),
    ));
    (service, delivery)
}

/// Profile submission fields with the four known keys.
pub fn profile_fields(email: &str, name: &str, id_number: &str, country: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("email".into(), json!(email));
    map.insert("name".into(), json!(name));
    map.insert("id_number".into(), json!(id_number));
    map.insert("country".into(), json!(country));
    map
}

/// Submit a profile and return the delivered code.
pub fn submit_and_capture(
    service: &OnboardingService,
    delivery: &CaptureDelivery,
    email: &str,
    name: &str,
    id_number: &str,
    country: &str,
) -> String {
    service
        .submit_profile(profile_fields(email, name, id_number, country))
        .expect("submission accepted");
    delivery.code_for(email)
}
