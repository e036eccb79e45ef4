mod client;
mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use meetgrid_core::BatchAction;

use crate::client::ApiClient;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "meetgrid")]
#[command(about = "Mark when you are unavailable on a shared event calendar")]
struct Cli {
    /// Backend server URL (overrides the configured one)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in (or register) under a display name
    Login { name: String },
    /// Forget the stored identity
    Logout,
    /// List shared events
    Events,
    /// Show an event's unavailability heat-map
    Show {
        event: String,

        /// Show who is unavailable on this day (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,
    },
    /// Mark a range of slots as unavailable
    Mark {
        event: String,

        /// Range start: YYYY-MM-DD or YYYY-MM-DD:tod (morning/noon/evening)
        start: String,

        /// Range end, same format; defaults to the start day
        end: Option<String>,
    },
    /// Withdraw marks over a range of slots
    Unmark {
        event: String,

        /// Range start: YYYY-MM-DD or YYYY-MM-DD:tod (morning/noon/evening)
        start: String,

        /// Range end, same format; defaults to the start day
        end: Option<String>,
    },
    /// Remove every mark you have on an event
    Clear {
        event: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    let client = ApiClient::new(&config.server_url);

    match cli.command {
        Commands::Login { name } => commands::login::run(&client, &mut config, &name).await,
        Commands::Logout => commands::login::logout(&mut config),
        Commands::Events => commands::events::run(&client).await,
        Commands::Show { event, day } => {
            let user = config.require_user()?;
            commands::show::run(client, user, &event, day).await
        }
        Commands::Mark { event, start, end } => {
            let user = config.require_user()?;
            commands::mark::run(
                client,
                &mut config,
                user,
                &event,
                &start,
                end.as_deref(),
                BatchAction::Add,
            )
            .await
        }
        Commands::Unmark { event, start, end } => {
            let user = config.require_user()?;
            commands::mark::run(
                client,
                &mut config,
                user,
                &event,
                &start,
                end.as_deref(),
                BatchAction::Remove,
            )
            .await
        }
        Commands::Clear { event, yes } => {
            let user = config.require_user()?;
            commands::clear::run(client, &mut config, user, &event, yes).await
        }
    }
}
