use std::sync::Arc;

use mayday_relay::{ConnectivityProbe, Relay};

use crate::sessions::SessionStore;
use crate::users::UserRepository;

pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub sessions: SessionStore,
    pub relay: Relay,
    pub probe: ConnectivityProbe,
}
