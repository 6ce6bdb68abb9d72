//! Sequential fallback relay.
//!
//! The relay holds an ordered list of delivery methods and tries each in
//! turn, stopping at the first success. Each method is attempted at most
//! once per event; a failure is recorded as a diagnostic string and the
//! relay falls through to the next method. An event that exhausts every
//! method is reported as failed and not persisted.

use mayday_core::config::AdminPanelConfig;
use mayday_core::{DeliveryReport, EmergencyEvent};

use crate::http_api::HttpApiDelivery;
use crate::simple_post::SimplePostDelivery;
use crate::socket::SocketDelivery;
use crate::traits::{DeliveryMethod, RelayError};

/// Tries delivery methods in fixed priority order until one succeeds.
pub struct Relay {
    methods: Vec<Box<dyn DeliveryMethod>>,
}

impl Relay {
    /// Build the standard three-method cascade: real-time socket,
    /// structured HTTP API, plain-form fallback.
    pub fn from_config(admin: &AdminPanelConfig) -> Result<Self, RelayError> {
        Ok(Self {
            methods: vec![
                Box::new(SocketDelivery::from_config(admin)?),
                Box::new(HttpApiDelivery::from_config(admin)),
                Box::new(SimplePostDelivery::from_config(admin)),
            ],
        })
    }

    /// Build a relay from an explicit method list (tests, alternate stacks).
    pub fn new(methods: Vec<Box<dyn DeliveryMethod>>) -> Self {
        Self { methods }
    }

    /// Deliver one event. Runs each method to completion (including its
    /// own timeout) before trying the next; first success short-circuits.
    pub async fn send(&self, event: &EmergencyEvent) -> DeliveryReport {
        let mut errors: Vec<String> = Vec::new();

        for method in &self.methods {
            let start = std::time::Instant::now();
            match method.attempt(event).await {
                Ok(()) => {
                    tracing::info!(
                        user = %event.user,
                        method = method.method_name(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        "SOS delivered"
                    );
                    return DeliveryReport::success(
                        method.method_name(),
                        method.success_message(),
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        user = %event.user,
                        method = method.method_name(),
                        error = %e,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Delivery attempt failed, falling through"
                    );
                    errors.push(format!("{}: {}", method.method_name(), e));
                }
            }
        }

        tracing::error!(user = %event.user, errors = ?errors, "All SOS delivery methods failed");
        DeliveryReport::all_failed(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mayday_core::{DeliveryStatus, SosSignal};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockMethod {
        name: String,
        attempt_count: Arc<AtomicUsize>,
        should_fail: bool,
    }

    impl MockMethod {
        fn boxed(name: &str, count: &Arc<AtomicUsize>, should_fail: bool) -> Box<dyn DeliveryMethod> {
            Box::new(Self {
                name: name.to_string(),
                attempt_count: count.clone(),
                should_fail,
            })
        }
    }

    #[async_trait::async_trait]
    impl DeliveryMethod for MockMethod {
        async fn attempt(&self, _event: &EmergencyEvent) -> Result<(), RelayError> {
            self.attempt_count.fetch_add(1, Ordering::SeqCst);
            if self.should_fail {
                Err(RelayError::Socket("mock failure".to_string()))
            } else {
                Ok(())
            }
        }
        fn method_name(&self) -> &str {
            &self.name
        }
        fn success_message(&self) -> &str {
            "sent"
        }
    }

    fn event() -> EmergencyEvent {
        EmergencyEvent::from_signal("demo", SosSignal::default())
    }

    #[tokio::test]
    async fn first_success_short_circuits() {
        let socket = Arc::new(AtomicUsize::new(0));
        let api = Arc::new(AtomicUsize::new(0));
        let form = Arc::new(AtomicUsize::new(0));

        let relay = Relay::new(vec![
            MockMethod::boxed("SocketIO", &socket, false),
            MockMethod::boxed("HTTP API", &api, false),
            MockMethod::boxed("Simple POST", &form, false),
        ]);

        let report = relay.send(&event()).await;
        assert!(report.is_success());
        assert_eq!(report.method.as_deref(), Some("SocketIO"));
        assert_eq!(socket.load(Ordering::SeqCst), 1);
        assert_eq!(api.load(Ordering::SeqCst), 0);
        assert_eq!(form.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_through_to_http_api() {
        let socket = Arc::new(AtomicUsize::new(0));
        let api = Arc::new(AtomicUsize::new(0));
        let form = Arc::new(AtomicUsize::new(0));

        let relay = Relay::new(vec![
            MockMethod::boxed("SocketIO", &socket, true),
            MockMethod::boxed("HTTP API", &api, false),
            MockMethod::boxed("Simple POST", &form, false),
        ]);

        let report = relay.send(&event()).await;
        assert!(report.is_success());
        assert_eq!(report.method.as_deref(), Some("HTTP API"));
        assert_eq!(socket.load(Ordering::SeqCst), 1);
        assert_eq!(api.load(Ordering::SeqCst), 1);
        assert_eq!(form.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn all_failed_aggregates_diagnostics() {
        let socket = Arc::new(AtomicUsize::new(0));
        let api = Arc::new(AtomicUsize::new(0));
        let form = Arc::new(AtomicUsize::new(0));

        let relay = Relay::new(vec![
            MockMethod::boxed("SocketIO", &socket, true),
            MockMethod::boxed("HTTP API", &api, true),
            MockMethod::boxed("Simple POST", &form, true),
        ]);

        let report = relay.send(&event()).await;
        assert_eq!(report.status, DeliveryStatus::Error);
        assert!(report.method.is_none());
        // One diagnostic per attempted method.
        assert_eq!(report.details.len(), 3);
        assert!(report.details[0].starts_with("SocketIO: "));
        assert!(report.details[1].starts_with("HTTP API: "));
        assert!(report.details[2].starts_with("Simple POST: "));
        // Message surfaces at most the first two.
        assert!(report.message.contains("SocketIO"));
        assert!(report.message.contains("HTTP API"));
        assert!(!report.message.contains("Simple POST"));
    }

    #[tokio::test]
    async fn each_method_attempted_at_most_once() {
        let socket = Arc::new(AtomicUsize::new(0));
        let api = Arc::new(AtomicUsize::new(0));
        let form = Arc::new(AtomicUsize::new(0));

        let relay = Relay::new(vec![
            MockMethod::boxed("SocketIO", &socket, true),
            MockMethod::boxed("HTTP API", &api, true),
            MockMethod::boxed("Simple POST", &form, true),
        ]);

        relay.send(&event()).await;
        assert_eq!(socket.load(Ordering::SeqCst), 1);
        assert_eq!(api.load(Ordering::SeqCst), 1);
        assert_eq!(form.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_relay_reports_error() {
        let relay = Relay::new(Vec::new());
        let report = relay.send(&event()).await;
        assert_eq!(report.status, DeliveryStatus::Error);
        assert!(report.details.is_empty());
    }
}
