pub mod admin;
pub mod participant;

pub use admin::{handle_admin_command, AdminCommands};
pub use participant::{handle_participant_command, ParticipantCommands};

use chrono::Local;
use seatdraw_core::{KeyValueBackend, ParticipantManager, ParticipantRecord};

/// Manager over whichever backend the CLI was configured with.
pub type Manager = ParticipantManager<Box<dyn KeyValueBackend>>;

pub(crate) fn print_record(manager: &Manager, record: &ParticipantRecord) {
    println!("  Participant ID: {}", record.id);
    println!("  Team: {}", record.team_number);
    println!("  Lottery Number: {}", record.lottery_number);
    println!(
        "  Registered: {}",
        record
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Link: {}", manager.participant_url(&record.id));
}
