use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "trip-tui")]
#[command(about = "Terminal UI for planning a trip itinerary")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the trip planner backend
    Run,
    /// Run in dev mode with an in-memory sample trip
    Dev,
    /// Store a backend session token
    Login {
        /// Value of the backend's `id` session cookie
        #[arg(long)]
        token: String,
    },
    /// Remove the stored session token
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
