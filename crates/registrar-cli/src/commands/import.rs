use anyhow::Context;
use registrar_core::roster::Roster;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar import <roster.toml>`.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read roster at {}", args.path))?;
    let roster: Roster =
        toml::from_str(&raw).with_context(|| format!("failed to parse roster at {}", args.path))?;
    let summary = ctx.service.import_roster(&roster).await?;
    tracing::info!(path = %args.path, students = summary.students, "roster imported");
    output(&summary, flags.format)
}
