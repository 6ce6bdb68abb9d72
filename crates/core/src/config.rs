use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub admin_panel: AdminPanelConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            admin_panel: AdminPanelConfig::from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:       {}:{}", self.server.host, self.server.port);
        tracing::info!("  admin panel:  {}", self.admin_panel.base_url);
        tracing::info!(
            "  timeouts:     connect={}s ack={}s api={}s form={}s probe={}s",
            self.admin_panel.socket_connect_timeout_secs,
            self.admin_panel.socket_ack_window_secs,
            self.admin_panel.api_timeout_secs,
            self.admin_panel.form_timeout_secs,
            self.admin_panel.probe_timeout_secs,
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 5000),
            cors_origin: env_or("CORS_ORIGIN", "*"),
        }
    }
}

// ── Admin panel ───────────────────────────────────────────────

/// Connection settings for the external admin panel service.
///
/// The per-method timeouts are fixed policy values from the delivery
/// cascade: they are overridable via env for testing, but the cascade
/// order and single-attempt semantics are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPanelConfig {
    /// Base URL of the admin panel (e.g. `http://127.0.0.1:5001`).
    pub base_url: String,
    /// Bound on establishing the real-time socket connection.
    pub socket_connect_timeout_secs: u64,
    /// Window to wait for the socket confirmation event.
    pub socket_ack_window_secs: u64,
    /// Timeout for the structured HTTP API POST.
    pub api_timeout_secs: u64,
    /// Timeout for the plain form POST fallback.
    pub form_timeout_secs: u64,
    /// Timeout for the health probe GET.
    pub probe_timeout_secs: u64,
}

impl AdminPanelConfig {
    fn from_env() -> Self {
        Self {
            base_url: env_or("ADMIN_PANEL_URL", "http://127.0.0.1:5001"),
            socket_connect_timeout_secs: env_u64("SOCKET_CONNECT_TIMEOUT_SECS", 10),
            socket_ack_window_secs: env_u64("SOCKET_ACK_WINDOW_SECS", 3),
            api_timeout_secs: env_u64("API_TIMEOUT_SECS", 10),
            form_timeout_secs: env_u64("FORM_TIMEOUT_SECS", 5),
            probe_timeout_secs: env_u64("PROBE_TIMEOUT_SECS", 5),
        }
    }
}
