use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Offerings(args) => commands::offerings::handle(&args, ctx, flags).await,
        Commands::Login => commands::login::handle(ctx, flags).await,
        Commands::Transcript => commands::transcript::handle(ctx, flags).await,
        Commands::Current(args) => commands::current::handle(&args, ctx, flags).await,
        Commands::Detail(args) => commands::detail::handle(&args, ctx, flags).await,
        Commands::Enroll(args) => commands::enroll::handle_enroll(&args, ctx, flags).await,
        Commands::Withdraw(args) => commands::enroll::handle_withdraw(&args, ctx, flags).await,
        Commands::Profile { action } => commands::profile::handle(&action, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Grade(args) => commands::grade::handle(&args, ctx, flags).await,
        Commands::Term(_) | Commands::Schema(_) => {
            unreachable!("term/schema are pre-dispatched in main")
        }
    }
}
