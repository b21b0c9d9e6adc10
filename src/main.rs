use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    CheckCommand, ConfigCommand, ContactCommand, CustomerCommand, GroupCommand, ScheduleCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "npplan")]
#[command(version)]
#[command(about = "Plan NodePing API payloads from declared configuration", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Contacts and their notification addresses
    Contact(ContactCommand),

    /// Checks
    Check(CheckCommand),

    /// Notification schedules
    Schedule(ScheduleCommand),

    /// Contact groups
    Group(GroupCommand),

    /// Customers and sub-accounts
    Customer(CustomerCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    // Initialize tracing; stdout is reserved for payloads
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.value.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config.config_file {
        tracing::debug!("Config file: {}", path.display());
    }

    match &cli.command {
        Some(Commands::Contact(cmd)) => cmd.run(&config)?,
        Some(Commands::Check(cmd)) => cmd.run(&config)?,
        Some(Commands::Schedule(cmd)) => cmd.run(&config)?,
        Some(Commands::Group(cmd)) => cmd.run(&config)?,
        Some(Commands::Customer(cmd)) => cmd.run(&config)?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
