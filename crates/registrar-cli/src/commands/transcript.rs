use crate::cli::GlobalFlags;
use crate::commands::shared::session::require_student;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar transcript`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let student_id = require_student(ctx, flags).await?;
    let rows = ctx.service.transcript_for(student_id).await?;
    output(&rows, flags.format)
}
