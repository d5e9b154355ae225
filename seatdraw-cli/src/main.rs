mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::Manager;
use config::{BackendKind, CliConfig};
use seatdraw_core::{
    FileBackend, KeyValueBackend, ParticipantManager, SeatdrawError, SqliteBackend,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seatdraw")]
#[command(about = "Event check-in: team assignment and lottery numbers")]
#[command(version)]
struct Cli {
    /// Data directory for participant storage
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(short, long, global = true, value_enum)]
    backend: Option<BackendKind>,

    /// Number of teams
    #[arg(long, global = true)]
    teams: Option<u32>,

    /// Maximum members per team
    #[arg(long, global = true)]
    members_per_team: Option<u32>,

    /// Public base URL used in participant links
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Participant commands
    #[command(subcommand)]
    Participant(commands::ParticipantCommands),

    /// Admin commands
    #[command(subcommand)]
    Admin(commands::AdminCommands),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "seatdraw={},seatdraw_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get data directory
    let data_dir = cli.data_dir.unwrap_or_else(config::default_data_dir);

    // Ensure data directory exists
    std::fs::create_dir_all(&data_dir)?;

    let mut cli_config = CliConfig::load(&data_dir)?;
    if let Some(backend) = cli.backend {
        cli_config.backend = backend;
    }
    if let Some(teams) = cli.teams {
        cli_config.event.team_count = teams;
    }
    if let Some(members) = cli.members_per_team {
        cli_config.event.members_per_team = members;
    }
    if let Some(base_url) = cli.base_url {
        cli_config.event.base_url = base_url;
    }
    tracing::debug!("Using config: {:?}", cli_config);

    let result = open_manager(&cli_config).and_then(|manager| match cli.command {
        Commands::Participant(cmd) => commands::handle_participant_command(cmd, &manager),
        Commands::Admin(cmd) => commands::handle_admin_command(cmd, &manager),
    });

    if let Err(e) = result {
        match e {
            SeatdrawError::CapacityExhausted { capacity } => {
                eprintln!("Error: All {} seats are taken.", capacity);
                eprintln!("Please contact the organizer.");
            }
            SeatdrawError::NumberSpaceExhausted { .. } => {
                eprintln!("Error: {}", e);
                eprintln!("Please try again.");
            }
            SeatdrawError::Config(msg) => {
                eprintln!("Error: Invalid configuration: {}", msg);
                eprintln!("{}", config_hint(&data_dir));
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

fn open_manager(config: &CliConfig) -> seatdraw_core::Result<Manager> {
    let backend: Box<dyn KeyValueBackend> = match config.backend {
        BackendKind::File => Box::new(FileBackend::new(&config.data_dir)?),
        BackendKind::Sqlite => Box::new(SqliteBackend::in_dir(&config.data_dir)?),
    };

    ParticipantManager::new(config.event.clone(), backend)
}

/// Where an invalid event config can come from: the config file or the
/// overriding flags.
fn config_hint(data_dir: &Path) -> String {
    format!(
        "Check the --teams, --members-per-team and --base-url flags, or {}",
        data_dir.join(config::CONFIG_FILE_NAME).display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_hint_names_flags_and_file() {
        let hint = config_hint(Path::new("/tmp/seatdraw"));
        assert!(hint.contains("--teams"));
        assert!(hint.contains("--members-per-team"));
        assert!(hint.contains(&PathBuf::from("/tmp/seatdraw").join("config.json").display().to_string()));
    }
}
