use super::{print_record, Manager};
use clap::Subcommand;
use seatdraw_core::{ParticipantRecord, QrPayload, Result, SeatdrawError};

#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// Assign a team and lottery number to a new participant
    Register,
    /// Show a participant by id, path or link
    Show {
        /// Participant id, `/participant/<id>` path or full link
        reference: String,
    },
    /// Decode the JSON carried by a participant QR code
    DecodeQr {
        /// QR payload text
        payload: String,
    },
}

/// What `participant show` has to render for a reference.
#[derive(Debug, PartialEq)]
pub enum Lookup {
    Found(ParticipantRecord),
    NotFound,
    InvalidId,
}

/// Resolves a reference to a display state. Misses are not errors here;
/// storage failures still are.
pub fn lookup_participant(manager: &Manager, reference: &str) -> Result<Lookup> {
    match manager.lookup_route(reference) {
        Ok(record) => Ok(Lookup::Found(record)),
        Err(SeatdrawError::NotFound { id }) => {
            tracing::debug!("No participant stored under {}", id);
            Ok(Lookup::NotFound)
        }
        Err(SeatdrawError::InvalidRoute(reason)) => {
            tracing::debug!("Unusable participant reference: {}", reason);
            Ok(Lookup::InvalidId)
        }
        Err(e) => Err(e),
    }
}

pub fn handle_participant_command(cmd: ParticipantCommands, manager: &Manager) -> Result<()> {
    match cmd {
        ParticipantCommands::Register => {
            let record = manager.register()?;
            let payload = manager.qr_payload(&record).encode()?;

            println!("Registration complete!");
            println!();
            println!("  You are on team {}", record.team_number);
            println!("  Your lottery number is {}", record.lottery_number);
            println!();
            print_record(manager, &record);
            println!("  QR Payload: {}", payload);
            println!();
            println!("Keep the link above to check your assignment later.");
        }

        ParticipantCommands::Show { reference } => {
            match lookup_participant(manager, &reference)? {
                Lookup::Found(record) => {
                    println!("Participant Details:");
                    print_record(manager, &record);
                }
                Lookup::NotFound => {
                    println!("Participant not found.");
                    println!("Check that the QR code or link is valid.");
                }
                Lookup::InvalidId => {
                    println!("Invalid participant ID.");
                }
            }
        }

        ParticipantCommands::DecodeQr { payload } => match QrPayload::decode(&payload) {
            Some(data) => {
                println!("QR Code Contents:");
                println!("  Participant ID: {}", data.participant_id);
                println!("  Team: {}", data.team_number);
                println!("  Lottery Number: {}", data.lottery_number);
                println!("  Link: {}", manager.participant_url(&data.participant_id));
            }
            None => {
                println!("Not a valid participant QR code.");
            }
        },
    }

    Ok(())
}
