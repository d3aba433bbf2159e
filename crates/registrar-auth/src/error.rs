use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Username/password pair did not match. Deliberately says nothing about
    /// which half was wrong.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("malformed stored credential: {0}")]
    MalformedHash(String),

    #[error("random number generator failed: {0}")]
    Rng(String),

    #[error("{0}")]
    Other(String),
}
