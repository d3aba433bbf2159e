//! Profile repository: the student header and single-field edits.

use registrar_auth::hash_password;
use registrar_core::entities::Student;

use crate::error::DatabaseError;
use crate::service::RecordsService;

impl RecordsService {
    /// Name and address of a student.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the student does not exist.
    pub async fn student_profile(&self, student_id: i64) -> Result<Student, DatabaseError> {
        let student = self
            .bounded("student_profile", async {
                let mut rows = self
                    .db()
                    .conn()
                    .query(
                        "SELECT id, name, address FROM students WHERE id = ?1",
                        [student_id],
                    )
                    .await?;
                match rows.next().await? {
                    Some(row) => Ok(Some(Student {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        address: row.get(2)?,
                    })),
                    None => Ok(None),
                }
            })
            .await?;
        student.ok_or_else(|| DatabaseError::not_found("student", student_id))
    }

    /// Replace a student's password. The new password is hashed first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty password and
    /// `DatabaseError::NotFound` if the student does not exist.
    pub async fn change_password(
        &self,
        student_id: i64,
        new_password: &str,
    ) -> Result<(), DatabaseError> {
        if new_password.is_empty() {
            return Err(DatabaseError::Validation("password must not be empty".into()));
        }
        let password = new_password.to_owned();
        let iterations = self.hash_iterations();
        let hash = Self::off_runtime(move || hash_password(&password, iterations)).await??;
        self.update_student_field(student_id, "password_hash", &hash)
            .await?;
        tracing::info!(student_id, "password changed");
        Ok(())
    }

    /// Replace a student's address.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the student does not exist.
    pub async fn change_address(
        &self,
        student_id: i64,
        new_address: &str,
    ) -> Result<(), DatabaseError> {
        self.update_student_field(student_id, "address", new_address)
            .await?;
        tracing::info!(student_id, "address changed");
        Ok(())
    }

    /// Single-column update in its own transaction. `column` is always one
    /// of the fixed names above, never caller input.
    async fn update_student_field(
        &self,
        student_id: i64,
        column: &'static str,
        value: &str,
    ) -> Result<(), DatabaseError> {
        let sql = format!("UPDATE students SET {column} = ?1 WHERE id = ?2");
        let changed = self
            .bounded("update_student", async {
                let tx = self.begin_immediate().await?;
                let result = tx
                    .execute(&sql, libsql::params![value, student_id])
                    .await
                    .map_err(DatabaseError::from);
                Self::finish(tx, result).await
            })
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("student", student_id));
        }
        Ok(())
    }
}
