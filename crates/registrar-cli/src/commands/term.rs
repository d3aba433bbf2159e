use registrar_config::RegistrarConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TermArgs;
use crate::commands::shared::term::resolve_term;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TermView {
    term: String,
    quarter: String,
    year: i32,
    pinned: bool,
}

/// Handle `registrar term`.
pub fn handle(args: &TermArgs, config: &RegistrarConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let term = resolve_term(args, config)?;
    let view = TermView {
        term: term.to_string(),
        quarter: term.quarter.to_string(),
        year: term.year,
        pinned: args.year.is_some() || config.term.is_pinned(),
    };
    output(&view, flags.format)
}
