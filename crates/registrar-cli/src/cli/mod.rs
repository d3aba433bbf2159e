use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `registrar` binary.
#[derive(Debug, Parser)]
#[command(
    name = "registrar",
    version,
    about = "Registrar - student records, enrollment, and transcripts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides database.path)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Student id to log in as (falls back to REGISTRAR_USER)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Password for --user (falls back to REGISTRAR_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            db: self.db.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}
