//! Salted password hashing and constant-time verification.

use std::fmt;
use std::str::FromStr;

use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::AuthError;

/// Scheme tag at the start of every stored credential.
pub const SCHEME: &str = "pbkdf2-sha256";

/// Random salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (one SHA-256 block).
pub const KEY_LEN: usize = 32;

/// Fixed salt used to burn the same amount of work for unknown users.
const DUMMY_SALT: [u8; SALT_LEN] = [0x5a; SALT_LEN];

/// A parsed stored credential.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    iterations: u32,
    salt: Vec<u8>,
    key: [u8; KEY_LEN],
}

impl PasswordHash {
    /// Derive a credential for `password` with an explicit salt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` if `iterations` is zero or `salt` is empty.
    pub fn derive(password: &str, salt: &[u8], iterations: u32) -> Result<Self, AuthError> {
        if iterations == 0 {
            return Err(AuthError::Other("iteration count must be positive".into()));
        }
        if salt.is_empty() {
            return Err(AuthError::Other("salt must not be empty".into()));
        }
        let key = pbkdf2_sha256(password.as_bytes(), salt, iterations);
        Ok(Self {
            iterations,
            salt: salt.to_vec(),
            key,
        })
    }

    /// Check `password` against this credential in constant time.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        pbkdf2_sha256(password.as_bytes(), &self.salt, self.iterations)
            .ct_eq(&self.key)
            .into()
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SCHEME}${}${}${}",
            self.iterations,
            hex::encode(&self.salt),
            hex::encode(self.key)
        )
    }
}

// Never print key material.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

impl FromStr for PasswordHash {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('$').collect();
        let [scheme, iterations, salt, key] = parts.as_slice() else {
            return Err(AuthError::MalformedHash(format!(
                "expected 4 '$'-separated fields, found {}",
                parts.len()
            )));
        };
        if *scheme != SCHEME {
            return Err(AuthError::MalformedHash(format!("unknown scheme '{scheme}'")));
        }
        let iterations: u32 = iterations
            .parse()
            .map_err(|e| AuthError::MalformedHash(format!("iterations: {e}")))?;
        if iterations == 0 {
            return Err(AuthError::MalformedHash("iterations must be positive".into()));
        }
        let salt = hex::decode(salt).map_err(|e| AuthError::MalformedHash(format!("salt: {e}")))?;
        if salt.is_empty() {
            return Err(AuthError::MalformedHash("empty salt".into()));
        }
        let key_bytes =
            hex::decode(key).map_err(|e| AuthError::MalformedHash(format!("key: {e}")))?;
        let key: [u8; KEY_LEN] = key_bytes.try_into().map_err(|bytes: Vec<u8>| {
            AuthError::MalformedHash(format!("key is {} bytes, expected {KEY_LEN}", bytes.len()))
        })?;
        Ok(Self {
            iterations,
            salt,
            key,
        })
    }
}

/// Hash a new password with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::EmptyPassword` for an empty password and
/// `AuthError::Rng` if the OS random source fails.
pub fn hash_password(password: &str, iterations: u32) -> Result<String, AuthError> {
    if password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    let mut salt = [0u8; SALT_LEN];
    getrandom::fill(&mut salt).map_err(|e| AuthError::Rng(e.to_string()))?;
    Ok(PasswordHash::derive(password, &salt, iterations)?.to_string())
}

/// Verify `password` against a stored credential string.
///
/// Malformed stored credentials never verify.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.parse::<PasswordHash>() {
        Ok(hash) => hash.verify(password),
        Err(error) => {
            tracing::warn!(%error, "stored credential could not be parsed");
            false
        }
    }
}

/// Spend the same derivation work as a real verification, for lookups that
/// found no account. Always returns `false`.
#[must_use]
pub fn verify_against_dummy(password: &str, iterations: u32) -> bool {
    let _ = pbkdf2_sha256(password.as_bytes(), &DUMMY_SALT, iterations.max(1));
    false
}

/// PBKDF2 (RFC 8018) with HMAC-SHA256, single output block.
fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    pbkdf2::pbkdf2_hmac_array::<Sha256, KEY_LEN>(password, salt, iterations)
}
