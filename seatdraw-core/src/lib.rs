//! seatdraw - team and lottery-number assignment for event attendees
//!
//! Each attendee gets one of a fixed number of teams (capped per team) and a
//! lottery number that is unique across the whole event. Assignments live in
//! a single JSON blob behind a pluggable key-value backend.

pub mod allocator;
pub mod config;
pub mod error;
pub mod link;
pub mod manager;
pub mod storage;
pub mod types;

pub use allocator::Allocator;
pub use config::EventConfig;
pub use error::{Result, SeatdrawError};
pub use link::{participant_url, parse_participant_route, QrPayload};
pub use manager::ParticipantManager;
pub use storage::{FileBackend, KeyValueBackend, MemoryBackend, ParticipantStore, SqliteBackend};
pub use types::{ParticipantRecord, TeamStats, UsageStats};
