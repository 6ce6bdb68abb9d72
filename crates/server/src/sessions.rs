//! Explicit session tokens.
//!
//! A session is an opaque uuid token mapped to a username. Tokens are
//! issued at login, validated on every authenticated call, and destroyed
//! at logout. No ambient cookies, no expiry, no concurrent-session
//! tracking.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

pub struct SessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh token for a logged-in user.
    pub fn issue(&self, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.insert(token.clone(), username.to_string());
        token
    }

    /// Resolve a token to its username, if the session exists.
    pub fn resolve(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().expect("session lock poisoned");
        sessions.get(token).cloned()
    }

    /// Destroy a session. Returns true if it existed.
    pub fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.remove(token).is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
