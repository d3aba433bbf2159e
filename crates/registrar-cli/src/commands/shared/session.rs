use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;

const USER_ENV: &str = "REGISTRAR_USER";
const PASSWORD_ENV: &str = "REGISTRAR_PASSWORD";

/// Log in with the supplied credentials and return the student id.
pub async fn require_student(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<i64> {
    let (user, password) = credentials(
        flags,
        std::env::var(USER_ENV).ok(),
        std::env::var(PASSWORD_ENV).ok(),
    )?;
    ctx.service
        .login(&user, &password)
        .await
        .context("login failed")
}

/// Flags win over the environment; both a user and a password are required.
fn credentials(
    flags: &GlobalFlags,
    env_user: Option<String>,
    env_password: Option<String>,
) -> anyhow::Result<(String, String)> {
    let user = flags.user.clone().or(env_user).filter(|u| !u.is_empty());
    let password = flags.password.clone().or(env_password);
    match (user, password) {
        (Some(user), Some(password)) => Ok((user, password)),
        (None, _) => anyhow::bail!("no student given: pass --user or set {USER_ENV}"),
        (Some(_), None) => anyhow::bail!("no password given: pass --password or set {PASSWORD_ENV}"),
    }
}
