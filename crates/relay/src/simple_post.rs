//! Plain-form fallback delivery.
//!
//! Last resort: a reduced field subset POSTed as form-encoded data to the
//! admin panel's simple endpoint. Any 2xx response is accepted without
//! body validation.

use std::time::Duration;

use mayday_core::config::AdminPanelConfig;
use mayday_core::EmergencyEvent;

use crate::traits::{DeliveryMethod, RelayError};

/// Delivers a reduced event as a form-encoded POST.
pub struct SimplePostDelivery {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl SimplePostDelivery {
    pub fn from_config(admin: &AdminPanelConfig) -> Self {
        Self {
            url: format!(
                "{}/api/emergency/simple",
                admin.base_url.trim_end_matches('/')
            ),
            timeout: Duration::from_secs(admin.form_timeout_secs),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl DeliveryMethod for SimplePostDelivery {
    async fn attempt(&self, event: &EmergencyEvent) -> Result<(), RelayError> {
        let form = [
            ("emergency", "true"),
            ("user", event.user.as_str()),
            ("type", event.emergency_type.as_str()),
            ("location", event.location.as_str()),
            ("time", event.timestamp.as_str()),
        ];

        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(url = %self.url, "SOS sent via simple POST fallback");
            Ok(())
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            Err(RelayError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn method_name(&self) -> &str {
        "Simple POST"
    }

    fn success_message(&self) -> &str {
        "SOS sent (backup method)!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_built_from_base() {
        let admin = AdminPanelConfig {
            base_url: "http://127.0.0.1:5001".to_string(),
            socket_connect_timeout_secs: 10,
            socket_ack_window_secs: 3,
            api_timeout_secs: 10,
            form_timeout_secs: 5,
            probe_timeout_secs: 5,
        };
        let delivery = SimplePostDelivery::from_config(&admin);
        assert_eq!(delivery.url, "http://127.0.0.1:5001/api/emergency/simple");
        assert_eq!(delivery.method_name(), "Simple POST");
    }
}
