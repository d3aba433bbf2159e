use crate::cli::GlobalFlags;
use crate::cli::root_commands::TermArgs;
use crate::commands::shared::session::require_student;
use crate::commands::shared::term::resolve_term;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar current`: ungraded enrollments in the term.
pub async fn handle(args: &TermArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let term = resolve_term(args, &ctx.config)?;
    let student_id = require_student(ctx, flags).await?;
    let courses = ctx.service.current_courses_for(student_id, term).await?;
    output(&courses, flags.format)
}
