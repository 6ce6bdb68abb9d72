//! Structured HTTP API delivery.
//!
//! Single JSON POST to the admin panel's `/api/emergency/sos` endpoint.
//! Success requires both a 200-class transport status and an explicit
//! application-level success flag in the response body.

use std::time::Duration;

use serde::Serialize;

use mayday_core::config::AdminPanelConfig;
use mayday_core::{EmergencyEvent, LANE_ID};

use crate::traits::{DeliveryMethod, RelayError};

#[derive(Serialize)]
struct SosPayload<'a> {
    lane_id: u32,
    user_data: &'a EmergencyEvent,
}

/// Delivers events as JSON over HTTP to the admin panel API.
pub struct HttpApiDelivery {
    url: String,
    timeout: Duration,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl HttpApiDelivery {
    pub fn from_config(admin: &AdminPanelConfig) -> Self {
        Self {
            url: format!("{}/api/emergency/sos", admin.base_url.trim_end_matches('/')),
            timeout: Duration::from_secs(admin.api_timeout_secs),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl DeliveryMethod for HttpApiDelivery {
    async fn attempt(&self, event: &EmergencyEvent) -> Result<(), RelayError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SosPayload {
                lane_id: LANE_ID,
                user_data: event,
            })
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        if body.get("status").and_then(|v| v.as_str()) == Some("success") {
            tracing::info!(url = %self.url, "SOS sent via HTTP API");
            return Ok(());
        }

        let message = body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        Err(RelayError::Rejected(message.to_string()))
    }

    fn method_name(&self) -> &str {
        "HTTP API"
    }

    fn success_message(&self) -> &str {
        "SOS sent to emergency services!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_config(base_url: &str) -> AdminPanelConfig {
        AdminPanelConfig {
            base_url: base_url.to_string(),
            socket_connect_timeout_secs: 10,
            socket_ack_window_secs: 3,
            api_timeout_secs: 10,
            form_timeout_secs: 5,
            probe_timeout_secs: 5,
        }
    }

    #[test]
    fn url_built_from_base() {
        let delivery = HttpApiDelivery::from_config(&admin_config("http://127.0.0.1:5001"));
        assert_eq!(delivery.url, "http://127.0.0.1:5001/api/emergency/sos");
    }

    #[test]
    fn trailing_slash_stripped() {
        let delivery = HttpApiDelivery::from_config(&admin_config("http://127.0.0.1:5001/"));
        assert_eq!(delivery.url, "http://127.0.0.1:5001/api/emergency/sos");
    }

    #[test]
    fn method_name() {
        let delivery = HttpApiDelivery::from_config(&admin_config("http://127.0.0.1:5001"));
        assert_eq!(delivery.method_name(), "HTTP API");
    }
}
