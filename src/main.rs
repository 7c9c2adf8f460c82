mod commands;
mod logging;
mod render;
mod utils;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use countdown_core::config::CountdownConfig;

#[derive(Parser)]
#[command(name = "countdown")]
#[command(about = "Count down the days to your events")]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: list, add and delete events (the default)
    App,
    /// List events and the days left until each
    List {
        /// Print the stored events as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Add an event
    Add {
        name: String,

        /// Date of the event (YYYY-MM-DD)
        date: String,
    },
    /// Delete an event by id
    Delete { id: String },
    /// Manage the access token sent to the events API
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Show configuration paths and settings
    Config,
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Store an access token
    Login {
        #[arg(long)]
        token: String,

        /// How long the token stays valid (e.g. "1h", "30d")
        #[arg(long)]
        expires_in: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Show whether requests will be authenticated
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = CountdownConfig::load()?;

    match cli.command.unwrap_or(Commands::App) {
        Commands::App => commands::app::run(&config).await,
        Commands::List { json } => commands::list::run(&config, json).await,
        Commands::Add { name, date } => commands::add::run(&config, name, date).await,
        Commands::Delete { id } => commands::delete::run(&config, &id).await,
        Commands::Auth { command } => match command {
            AuthCommands::Login { token, expires_in } => {
                commands::auth::login(&config, token, expires_in.as_deref())
            }
            AuthCommands::Logout => commands::auth::logout(&config),
            AuthCommands::Status => commands::auth::status(&config),
        },
        Commands::Config => commands::config::run(&config),
    }
}
