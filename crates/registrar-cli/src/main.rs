use anyhow::Context;
use clap::Parser;
use registrar_db::error::DatabaseError;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

/// Exit status for an enrollment request the rules refused.
const EXIT_REJECTED: i32 = 2;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        if let Some(rejection) = error
            .downcast_ref::<DatabaseError>()
            .and_then(DatabaseError::rejection)
        {
            eprintln!("{rejection}");
            std::process::exit(EXIT_REJECTED);
        }
        eprintln!("registrar error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = bootstrap::load_config(&flags)?;

    if let cli::Commands::Term(args) = &cli.command {
        return commands::term::handle(args, &config, &flags);
    }

    let ctx = context::AppContext::init(config)
        .await
        .context("failed to open the records database")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REGISTRAR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
