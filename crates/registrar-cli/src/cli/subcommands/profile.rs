use clap::Subcommand;

/// Personal-detail commands for the logged-in student.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show name and address.
    Show,
    /// Change password.
    Password { new_password: String },
    /// Change address.
    Address { new_address: String },
}
