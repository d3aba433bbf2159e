//! Credential hashing configuration.

use serde::{Deserialize, Serialize};

/// Default PBKDF2 iteration count for newly stored passwords.
const fn default_hash_iterations() -> u32 {
    100_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Iterations used when hashing new passwords. Existing hashes keep the
    /// count they were created with.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hash_iterations: default_hash_iterations(),
        }
    }
}
