//! Session/auth repository: resolves credentials to a student id.
//!
//! Unknown users, malformed usernames, and wrong passwords all come back as
//! the same `AuthError::InvalidCredentials`. Unknown users still pay for one
//! key derivation so the three cases take comparable time.

use registrar_auth::AuthError;
use registrar_auth::password::{verify_against_dummy, verify_password};

use crate::error::DatabaseError;
use crate::service::RecordsService;

impl RecordsService {
    /// Verify a username/password pair. The username is the student id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Auth(AuthError::InvalidCredentials)` for any
    /// credential mismatch, or a storage error.
    pub async fn login(&self, username: &str, password: &str) -> Result<i64, DatabaseError> {
        let iterations = self.hash_iterations();
        let Ok(student_id) = username.trim().parse::<i64>() else {
            let password = password.to_owned();
            Self::off_runtime(move || verify_against_dummy(&password, iterations)).await?;
            tracing::debug!("login refused");
            return Err(AuthError::InvalidCredentials.into());
        };

        let stored = self
            .bounded("login", async {
                let mut rows = self
                    .db()
                    .conn()
                    .query("SELECT password_hash FROM students WHERE id = ?1", [student_id])
                    .await?;
                match rows.next().await? {
                    Some(row) => Ok(Some(row.get::<String>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        let password = password.to_owned();
        let verified = Self::off_runtime(move || match stored {
            Some(hash) => verify_password(&password, &hash),
            None => verify_against_dummy(&password, iterations),
        })
        .await?;
        if !verified {
            tracing::debug!("login refused");
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(student_id, "login succeeded");
        Ok(student_id)
    }
}
