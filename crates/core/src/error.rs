use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaydayError {
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}
