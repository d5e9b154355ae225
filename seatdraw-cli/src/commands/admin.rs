use super::{print_record, Manager};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Confirm;
use seatdraw_core::{Result, TeamStats};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Show seat usage per team
    Stats,
    /// List every participant ordered by lottery number
    List,
    /// Export all participant data as a dated JSON file
    Export {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Delete all participant data
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Register test participants
    GenerateTest {
        /// Number of participants to create
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },
}

pub fn handle_admin_command(cmd: AdminCommands, manager: &Manager) -> Result<()> {
    match cmd {
        AdminCommands::Stats => {
            let stats = manager.usage_stats()?;

            println!("Seat Usage:");
            println!("  Assigned: {}", stats.total_assigned);
            println!("  Capacity: {}", stats.total_capacity);
            println!("  Available: {}", stats.available_slots);
            println!("  Progress: {:.1}% complete", stats.fill_percent());
            println!();

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Team", "Members", "Status"]);

            for team in &stats.team_stats {
                table.add_row(vec![
                    format!("Team {}", team.team_number),
                    format!("{}/{}", team.current_count, team.max_count),
                    team_status(team),
                ]);
            }

            println!("{}", table);
        }

        AdminCommands::List => {
            let participants = manager.list_participants()?;

            if participants.is_empty() {
                println!("No participants registered.");
                println!("Register one with: seatdraw participant register");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Lottery #", "Team", "Participant ID", "Registered"]);

            for p in &participants {
                table.add_row(vec![
                    p.lottery_number.to_string(),
                    p.team_number.to_string(),
                    p.id.clone(),
                    p.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                ]);
            }

            println!("{}", table);
            println!("Total: {} participants", participants.len());
        }

        AdminCommands::Export { output } => {
            let path = manager.export_to_file(&output)?;
            println!("Exported participant data to {}", path.display());
        }

        AdminCommands::Clear { force } => {
            if !force {
                let confirmed = Confirm::new()
                    .with_prompt(
                        "Delete ALL participant data? This cannot be undone",
                    )
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("Clear cancelled.");
                    return Ok(());
                }
            }

            manager.clear_all()?;
            println!("All participant data has been deleted.");
        }

        AdminCommands::GenerateTest { count } => {
            for i in 0..count {
                match manager.register() {
                    Ok(record) => {
                        println!("Created test participant {}/{}:", i + 1, count);
                        print_record(manager, &record);
                    }
                    Err(e) if e.is_retryable() => {
                        println!("Stopped after {} of {}: {}", i, count, e);
                        break;
                    }
                    Err(e) => return Err(e),
                }
            }

            let stats = manager.usage_stats()?;
            println!();
            println!(
                "{}/{} seats now assigned",
                stats.total_assigned, stats.total_capacity
            );
        }
    }

    Ok(())
}

fn team_status(team: &TeamStats) -> String {
    if team.is_full() {
        "Full".to_string()
    } else if team.is_empty() {
        "Empty".to_string()
    } else {
        format!("{} seats left", team.available)
    }
}
