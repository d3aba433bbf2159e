use anyhow::Context;
use registrar_config::RegistrarConfig;
use registrar_core::term::{Quarter, Term};

use crate::cli::root_commands::TermArgs;

/// Explicit `--quarter/--year` first, then the configured or wall-clock term.
pub fn resolve_term(args: &TermArgs, config: &RegistrarConfig) -> anyhow::Result<Term> {
    match (args.quarter.as_deref(), args.year) {
        (Some(label), Some(year)) => {
            let quarter = label
                .parse::<Quarter>()
                .with_context(|| format!("invalid --quarter '{label}'"))?;
            Ok(Term::new(quarter, year))
        }
        (None, None) => config
            .term
            .resolve()
            .context("failed to resolve the current term"),
        _ => anyhow::bail!("--quarter and --year must be given together"),
    }
}
