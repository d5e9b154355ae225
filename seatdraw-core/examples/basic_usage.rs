use seatdraw_core::{EventConfig, ParticipantManager, SqliteBackend};
use tempfile::tempdir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create temp dir
    let temp_dir = tempdir()?;
    println!("Using temporary directory: {:?}", temp_dir.path());

    let backend = SqliteBackend::in_dir(temp_dir.path())?;
    let manager = ParticipantManager::new(EventConfig::new(3, 2), backend)?;

    println!("Registering participants...");
    for _ in 0..4 {
        let record = manager.register()?;
        println!(
            "  team {} / lottery #{} -> {}",
            record.team_number,
            record.lottery_number,
            manager.participant_url(&record.id)
        );
    }

    let stats = manager.usage_stats()?;
    println!(
        "\n{}/{} seats taken ({:.1}%)",
        stats.total_assigned,
        stats.total_capacity,
        stats.fill_percent()
    );
    for team in &stats.team_stats {
        println!("  team {}: {}/{}", team.team_number, team.current_count, team.max_count);
    }

    println!("\nExport:\n{}", manager.export_json()?);

    Ok(())
}
