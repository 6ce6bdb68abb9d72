//! DeliveryMethod trait definition and shared error types.

use mayday_core::EmergencyEvent;

/// Errors that can occur during a single delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("socket error: {0}")]
    Socket(String),

    #[error("timed out after {0}s")]
    Timeout(u64),

    #[error("no confirmation within {0}s")]
    NoConfirmation(u64),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API error: {0}")]
    Rejected(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Trait for emergency delivery transport implementations.
///
/// Each implementation makes exactly one attempt per call. Retry policy
/// (there is none) belongs to the caller, not the transport.
#[async_trait::async_trait]
pub trait DeliveryMethod: Send + Sync {
    /// Attempt to deliver one event through this transport.
    async fn attempt(&self, event: &EmergencyEvent) -> Result<(), RelayError>;

    /// Human-readable name for this transport (e.g., "SocketIO", "HTTP API").
    fn method_name(&self) -> &str;

    /// Message surfaced to the caller when this transport succeeds.
    fn success_message(&self) -> &str;
}
