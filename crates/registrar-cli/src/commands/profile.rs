use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProfileCommands;
use crate::commands::shared::session::require_student;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar profile`.
pub async fn handle(
    action: &ProfileCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let student_id = require_student(ctx, flags).await?;
    match action {
        ProfileCommands::Show => {}
        ProfileCommands::Password { new_password } => {
            ctx.service.change_password(student_id, new_password).await?;
            // Never echo credentials back.
            return output(
                &json!({ "student_id": student_id, "updated": "password" }),
                flags.format,
            );
        }
        ProfileCommands::Address { new_address } => {
            ctx.service
                .change_address(student_id, new_address.trim())
                .await?;
        }
    }
    let student = ctx.service.student_profile(student_id).await?;
    output(&student, flags.format)
}
