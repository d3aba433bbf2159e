use registrar_core::entities::Student;
use registrar_core::term::Term;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TermArgs;
use crate::commands::shared::session::require_student;
use crate::commands::shared::term::resolve_term;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StudentHeader {
    student: Student,
    term: Term,
}

/// Handle `registrar login`: verify credentials and show the student header.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let student_id = require_student(ctx, flags).await?;
    let student = ctx.service.student_profile(student_id).await?;
    let term = resolve_term(&TermArgs::default(), &ctx.config)?;
    output(&StudentHeader { student, term }, flags.format)
}
