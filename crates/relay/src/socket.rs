//! Real-time socket delivery.
//!
//! Opens a fresh transient WebSocket connection to the admin panel per
//! event, emits the SOS as a named-event JSON message, and waits a short
//! fixed window for an explicit confirmation event before closing.

use std::time::Duration;

use futures::{SinkExt, Stream, StreamExt};
use serde::Serialize;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use mayday_core::config::AdminPanelConfig;
use mayday_core::EmergencyEvent;

use crate::traits::{DeliveryMethod, RelayError};

/// Named-event envelope for socket messages.
#[derive(Serialize)]
struct WsMessage<T: Serialize> {
    #[serde(rename = "type")]
    msg_type: &'static str,
    data: T,
}

/// Delivers events over a transient WebSocket connection.
///
/// The connection is established, used for one send/confirm exchange,
/// and closed regardless of outcome. No retry.
pub struct SocketDelivery {
    /// Resolved ws:// or wss:// endpoint.
    endpoint: String,
    /// Bound on establishing the connection.
    connect_timeout: Duration,
    /// Window to wait for the confirmation event after sending.
    ack_window_secs: u64,
}

impl SocketDelivery {
    pub fn from_config(admin: &AdminPanelConfig) -> Result<Self, RelayError> {
        Ok(Self {
            endpoint: ws_endpoint(&admin.base_url)?,
            connect_timeout: Duration::from_secs(admin.socket_connect_timeout_secs),
            ack_window_secs: admin.socket_ack_window_secs,
        })
    }
}

#[async_trait::async_trait]
impl DeliveryMethod for SocketDelivery {
    async fn attempt(&self, event: &EmergencyEvent) -> Result<(), RelayError> {
        let (ws, _) = tokio::time::timeout(self.connect_timeout, connect_async(self.endpoint.as_str()))
            .await
            .map_err(|_| RelayError::Timeout(self.connect_timeout.as_secs()))?
            .map_err(|e| RelayError::Socket(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, "Connected to admin panel socket");

        let (mut sink, mut stream) = ws.split();

        let payload = serde_json::to_string(&WsMessage {
            msg_type: "user_sos_signal",
            data: event,
        })
        .map_err(|e| RelayError::Config(format!("failed to serialize event: {e}")))?;

        sink.send(Message::Text(payload))
            .await
            .map_err(|e| RelayError::Socket(e.to_string()))?;

        // Wait for the confirmation, then close regardless of outcome.
        let confirmed =
            wait_for_confirmation(&mut stream, Duration::from_secs(self.ack_window_secs)).await;
        let _ = sink.send(Message::Close(None)).await;

        if confirmed {
            tracing::info!(endpoint = %self.endpoint, "SOS confirmed by admin panel");
            Ok(())
        } else {
            Err(RelayError::NoConfirmation(self.ack_window_secs))
        }
    }

    fn method_name(&self) -> &str {
        "SocketIO"
    }

    fn success_message(&self) -> &str {
        "SOS sent via real-time connection!"
    }
}

/// Read incoming frames until a success confirmation arrives or the
/// window elapses. Any stream error or close frame ends the wait.
async fn wait_for_confirmation<S>(stream: &mut S, window: Duration) -> bool
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    let deadline = tokio::time::Instant::now() + window;
    loop {
        match tokio::time::timeout_at(deadline, stream.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => {
                if is_confirmation(&text) {
                    return true;
                }
            }
            // Pings, pongs, binary frames: keep waiting.
            Ok(Some(Ok(Message::Close(_)))) | Ok(None) => return false,
            Ok(Some(Ok(_))) => {}
            Ok(Some(Err(_))) => return false,
            // Window elapsed without confirmation.
            Err(_) => return false,
        }
    }
}

/// A frame counts as confirmation only when it names the confirmation
/// event AND carries an explicit success status.
fn is_confirmation(text: &str) -> bool {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return false;
    };
    value.get("type").and_then(|v| v.as_str()) == Some("sos_confirmation")
        && value
            .get("data")
            .and_then(|d| d.get("status"))
            .and_then(|v| v.as_str())
            == Some("success")
}

/// Derive the ws endpoint from the admin panel base URL.
fn ws_endpoint(base_url: &str) -> Result<String, RelayError> {
    let mut url = url::Url::parse(base_url)
        .map_err(|e| RelayError::Config(format!("invalid admin panel URL '{base_url}': {e}")))?;

    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        "ws" | "wss" => return Ok(join_ws_path(url)),
        other => {
            return Err(RelayError::Config(format!(
                "unsupported admin panel URL scheme: {other}"
            )))
        }
    };

    url.set_scheme(scheme)
        .map_err(|_| RelayError::Config(format!("cannot derive ws scheme from '{base_url}'")))?;
    Ok(join_ws_path(url))
}

fn join_ws_path(mut url: url::Url) -> String {
    url.set_path("/ws");
    url.to_string()
}
