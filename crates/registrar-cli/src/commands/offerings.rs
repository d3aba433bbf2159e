use crate::cli::GlobalFlags;
use crate::cli::root_commands::TermArgs;
use crate::commands::shared::term::resolve_term;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar offerings`.
pub async fn handle(args: &TermArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let term = resolve_term(args, &ctx.config)?;
    let listings = ctx.service.offerings_for_term(term).await?;
    output(&listings, flags.format)
}
