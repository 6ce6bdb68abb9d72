//! User repository.
//!
//! Credentials live behind the [`UserRepository`] trait so the auth
//! handlers never touch the backing store directly. Passwords are stored
//! as argon2 hashes, never plaintext. Entries are created at process
//! start (seed set) or via registration and are never mutated or deleted.

use std::collections::HashMap;
use std::sync::RwLock;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::info;

use mayday_core::MaydayError;

/// Demo accounts seeded at startup.
const SEED_USERS: &[(&str, &str)] = &[
    ("demo", "password123"),
    ("user1", "pass123"),
    ("emergency_user", "sos123"),
    ("john", "john123"),
    ("alice", "alice123"),
];

/// Lookup/insert interface for the credential table.
pub trait UserRepository: Send + Sync {
    /// Register a new user. Fails with [`MaydayError::DuplicateUser`] when
    /// the username is taken, regardless of password.
    fn insert(&self, username: &str, password: &str) -> Result<(), MaydayError>;

    /// Check a username/password pair. Fails with
    /// [`MaydayError::InvalidCredentials`] on unknown user or wrong
    /// password; never mutates the table.
    fn verify(&self, username: &str, password: &str) -> Result<(), MaydayError>;

    /// Registered usernames (startup log only — no secrets).
    fn usernames(&self) -> Vec<String>;
}

/// In-memory implementation: username → argon2 hash.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, String>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Build a repository pre-populated with the demo seed accounts.
    pub fn with_seed_users() -> Result<Self, MaydayError> {
        let repo = Self::new();
        for (username, password) in SEED_USERS {
            repo.insert(username, password)?;
        }
        info!("Seeded {} demo users", SEED_USERS.len());
        Ok(repo)
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_password(password: &str) -> Result<String, MaydayError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| MaydayError::PasswordHash(e.to_string()))
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, username: &str, password: &str) -> Result<(), MaydayError> {
        // Hash outside the lock; it's the expensive part.
        let hash = hash_password(password)?;

        let mut users = self.users.write().expect("user table lock poisoned");
        if users.contains_key(username) {
            return Err(MaydayError::DuplicateUser(username.to_string()));
        }
        users.insert(username.to_string(), hash);
        Ok(())
    }

    fn verify(&self, username: &str, password: &str) -> Result<(), MaydayError> {
        let hash = {
            let users = self.users.read().expect("user table lock poisoned");
            users.get(username).cloned()
        };
        let Some(hash) = hash else {
            return Err(MaydayError::InvalidCredentials);
        };

        let parsed =
            PasswordHash::new(&hash).map_err(|e| MaydayError::PasswordHash(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| MaydayError::InvalidCredentials)
    }

    fn usernames(&self) -> Vec<String> {
        let users = self.users.read().expect("user table lock poisoned");
        let mut names: Vec<String> = users.keys().cloned().collect();
        names.sort();
        names
    }
}
