//! Admin panel connectivity probe.
//!
//! Read-only health check against the admin panel. Never throws: every
//! failure path is folded into a structured [`ProbeReport`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use mayday_core::config::AdminPanelConfig;
use mayday_core::DeliveryStatus;

/// Result of one connectivity probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub status: DeliveryStatus,
    pub message: String,
    /// Remote health body on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_status: Option<serde_json::Value>,
}

/// Issues bounded-timeout health checks against the admin panel.
pub struct ConnectivityProbe {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ConnectivityProbe {
    pub fn from_config(admin: &AdminPanelConfig) -> Self {
        Self {
            url: format!("{}/health", admin.base_url.trim_end_matches('/')),
            timeout: Duration::from_secs(admin.probe_timeout_secs),
            client: reqwest::Client::new(),
        }
    }

    /// Probe the admin panel health endpoint.
    pub async fn probe(&self) -> ProbeReport {
        let response = match self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Admin panel unreachable");
                return ProbeReport {
                    status: DeliveryStatus::Error,
                    message: format!("Cannot reach admin panel: {e}"),
                    admin_status: None,
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ProbeReport {
                status: DeliveryStatus::Error,
                message: format!("Admin panel returned {}", status.as_u16()),
                admin_status: None,
            };
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => ProbeReport {
                status: DeliveryStatus::Success,
                message: "Connection to admin panel successful".to_string(),
                admin_status: Some(body),
            },
            Err(e) => ProbeReport {
                status: DeliveryStatus::Error,
                message: format!("Cannot reach admin panel: {e}"),
                admin_status: None,
            },
        }
    }
}
