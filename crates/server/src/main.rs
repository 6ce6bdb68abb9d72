mod api;
mod router;
mod sessions;
mod state;
mod users;

use std::sync::Arc;

use tracing::info;

use mayday_relay::{ConnectivityProbe, Relay};

use crate::sessions::SessionStore;
use crate::state::AppState;
use crate::users::{InMemoryUserRepository, UserRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    mayday_core::config::load_dotenv();
    let config = mayday_core::Config::from_env();
    config.log_summary();

    let users = Arc::new(InMemoryUserRepository::with_seed_users()?);
    info!("Demo users: {:?}", users.usernames());

    let relay = Relay::from_config(&config.admin_panel)
        .map_err(|e| anyhow::anyhow!("failed to build delivery cascade: {e}"))?;
    let probe = ConnectivityProbe::from_config(&config.admin_panel);

    let state = Arc::new(AppState {
        users,
        sessions: SessionStore::new(),
        relay,
        probe,
    });

    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");
    info!("Admin panel URL: {}", config.admin_panel.base_url);
    info!("SOS system ready");
    axum::serve(listener, app).await?;

    Ok(())
}
