//! # registrar-auth
//!
//! Credential handling for Registrar.
//!
//! Passwords are never stored or compared in plaintext. A stored credential is
//! a PBKDF2-HMAC-SHA256 derived key with a per-password random salt, encoded
//! as:
//!
//! ```text
//! pbkdf2-sha256$<iterations>$<salt-hex>$<key-hex>
//! ```
//!
//! Verification re-derives the key and compares in constant time (`subtle`).

pub mod error;
pub mod password;

pub use error::AuthError;
pub use password::{PasswordHash, hash_password, verify_password};
