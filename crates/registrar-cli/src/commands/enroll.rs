use chrono::Utc;
use registrar_core::entities::OfferingKey;
use registrar_core::events::low_enrollment_event;
use registrar_core::outcome::TransitionOutcome;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OfferingArgs;
use crate::commands::shared::session::require_student;
use crate::commands::shared::term::resolve_term;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TransitionReport {
    #[serde(flatten)]
    outcome: TransitionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

impl From<TransitionOutcome> for TransitionReport {
    fn from(outcome: TransitionOutcome) -> Self {
        let warning =
            low_enrollment_event(&outcome, Utc::now()).map(|event| event.message().to_string());
        Self { outcome, warning }
    }
}

fn offering_for(args: &OfferingArgs, ctx: &AppContext) -> anyhow::Result<OfferingKey> {
    let term = resolve_term(&args.term, &ctx.config)?;
    Ok(OfferingKey::new(args.course_id.trim(), term))
}

/// Handle `registrar enroll <course>`.
pub async fn handle_enroll(
    args: &OfferingArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let offering = offering_for(args, ctx)?;
    let student_id = require_student(ctx, flags).await?;
    let outcome = ctx.service.enroll(student_id, &offering).await?;
    output(&TransitionReport::from(outcome), flags.format)
}

/// Handle `registrar withdraw <course>`.
pub async fn handle_withdraw(
    args: &OfferingArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let offering = offering_for(args, ctx)?;
    let student_id = require_student(ctx, flags).await?;
    let outcome = ctx.service.withdraw(student_id, &offering).await?;
    output(&TransitionReport::from(outcome), flags.format)
}
