//! Emergency event and delivery report domain types.
//!
//! An [`EmergencyEvent`] is built fresh per incoming SOS signal and lives
//! only for the duration of one relay pass. It is never queued or persisted.

use serde::{Deserialize, Serialize};

/// Fixed lane identifier attached to every outgoing event.
pub const LANE_ID: u32 = 1;

/// Caller-supplied SOS fields. Every field is optional; defaults are
/// substituted when constructing the [`EmergencyEvent`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SosSignal {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub emergency_type: Option<String>,
    pub coordinates: Option<String>,
    pub phone: Option<String>,
}

/// One emergency alert, addressed to the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyEvent {
    pub user: String,
    pub user_id: String,
    pub location: String,
    pub timestamp: String,
    pub emergency_type: String,
    pub lane_id: u32,
    pub coordinates: String,
    pub phone: String,
}

impl EmergencyEvent {
    /// Build an event for `username` from a raw signal, substituting
    /// defaults for absent fields and stamping the current local time.
    pub fn from_signal(username: &str, signal: SosSignal) -> Self {
        Self {
            user: username.to_string(),
            user_id: username.to_string(),
            location: signal
                .location
                .unwrap_or_else(|| "Location not provided".to_string()),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            emergency_type: signal
                .emergency_type
                .unwrap_or_else(|| "General Emergency".to_string()),
            lane_id: LANE_ID,
            coordinates: signal.coordinates.unwrap_or_else(|| "Unknown".to_string()),
            phone: signal.phone.unwrap_or_else(|| "Not provided".to_string()),
        }
    }
}

// ── Delivery report ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Success,
    Error,
}

/// Outcome of one relay pass, returned to the caller. Transient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub status: DeliveryStatus,
    pub message: String,
    /// Name of the delivery method that succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Full per-attempt error list when every method failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl DeliveryReport {
    pub fn success(method: &str, message: &str) -> Self {
        Self {
            status: DeliveryStatus::Success,
            message: message.to_string(),
            method: Some(method.to_string()),
            details: Vec::new(),
        }
    }

    /// Report for an event that exhausted every delivery method. The
    /// human-readable message surfaces at most the first two errors;
    /// the full list is retained in `details` for diagnostics.
    pub fn all_failed(errors: Vec<String>) -> Self {
        let surfaced = errors
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(" | ");
        Self {
            status: DeliveryStatus::Error,
            message: format!("Failed to reach emergency services. {surfaced}"),
            method: None,
            details: errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DeliveryStatus::Success
    }
}
