use registrar_core::entities::OfferingKey;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GradeArgs;
use crate::commands::shared::term::resolve_term;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PostedGrade {
    student_id: i64,
    offering: OfferingKey,
    grade: String,
}

/// Handle `registrar grade <student> <course> <grade>`.
pub async fn handle(args: &GradeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let term = resolve_term(&args.term, &ctx.config)?;
    let offering = OfferingKey::new(args.course_id.trim(), term);
    let grade = ctx
        .service
        .post_grade(args.student_id, &offering, &args.grade)
        .await?;
    output(
        &PostedGrade {
            student_id: args.student_id,
            offering,
            grade,
        },
        flags.format,
    )
}
