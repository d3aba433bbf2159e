use crate::cli::GlobalFlags;
use crate::cli::root_commands::DetailArgs;
use crate::commands::shared::session::require_student;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar detail <course>`.
pub async fn handle(args: &DetailArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let student_id = require_student(ctx, flags).await?;
    let detail = ctx
        .service
        .course_detail(args.course_id.trim(), student_id)
        .await?;
    output(&detail, flags.format)
}
