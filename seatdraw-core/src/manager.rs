use crate::allocator::Allocator;
use crate::config::EventConfig;
use crate::error::{Result, SeatdrawError};
use crate::link::{self, QrPayload};
use crate::storage::{KeyValueBackend, MemoryBackend, ParticipantStore};
use crate::types::{ParticipantRecord, TeamStats, UsageStats};
use chrono::{NaiveDate, Utc};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Entry point for both the participant and the admin surface.
pub struct ParticipantManager<B> {
    store: ParticipantStore<B>,
    allocator: Allocator,
}

impl ParticipantManager<MemoryBackend> {
    pub fn in_memory(config: EventConfig) -> Result<Self> {
        Self::new(config, MemoryBackend::new())
    }
}

impl<B: KeyValueBackend> ParticipantManager<B> {
    pub fn new(config: EventConfig, backend: B) -> Result<Self> {
        let store = ParticipantStore::new(backend, config.storage_key.clone());
        Ok(Self {
            store,
            allocator: Allocator::new(config)?,
        })
    }

    pub fn config(&self) -> &EventConfig {
        self.allocator.config()
    }

    pub fn store(&self) -> &ParticipantStore<B> {
        &self.store
    }

    /// Pick a team and lottery number without saving anything.
    pub fn allocate(&self) -> Result<ParticipantRecord> {
        self.allocate_with_rng(&mut rand::thread_rng())
    }

    pub fn allocate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ParticipantRecord> {
        let existing = self.store.list_all()?;
        self.allocator.allocate_with_rng(&existing, rng)
    }

    /// Persist a record produced by [`allocate`](Self::allocate).
    pub fn commit(&self, record: &ParticipantRecord) -> Result<()> {
        self.store.put(record)?;
        tracing::info!("Saved participant {}", record.id);
        Ok(())
    }

    /// Allocate and persist in one step.
    pub fn register(&self) -> Result<ParticipantRecord> {
        self.register_with_rng(&mut rand::thread_rng())
    }

    pub fn register_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ParticipantRecord> {
        let existing = self.store.list_all()?;
        let capacity = self.config().capacity();
        if existing.len() >= capacity as usize {
            tracing::warn!("Registration refused: all {} seats are taken", capacity);
            return Err(SeatdrawError::CapacityExhausted { capacity });
        }

        let record = self.allocator.allocate_with_rng(&existing, rng)?;
        self.commit(&record)?;
        Ok(record)
    }

    pub fn lookup(&self, participant_id: &str) -> Result<ParticipantRecord> {
        self.store
            .get(participant_id)?
            .ok_or_else(|| SeatdrawError::not_found(participant_id))
    }

    /// Resolve an id, `/participant/<id>` path or participant URL.
    pub fn lookup_route(&self, reference: &str) -> Result<ParticipantRecord> {
        let participant_id = link::parse_participant_route(reference)?;
        self.lookup(&participant_id)
    }

    /// All participants ordered by lottery number.
    pub fn list_participants(&self) -> Result<Vec<ParticipantRecord>> {
        let mut participants = self.store.list_all()?;
        participants.sort_by(|a, b| {
            a.lottery_number
                .cmp(&b.lottery_number)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(participants)
    }

    pub fn usage_stats(&self) -> Result<UsageStats> {
        let participants = self.store.list_all()?;
        usage_stats(self.config(), &participants)
    }

    pub fn export_json(&self) -> Result<String> {
        self.store.export_json()
    }

    /// Write the store to `participants-<date>.json` inside `dir`.
    pub fn export_to_file(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let path = dir.join(export_file_name(Utc::now().date_naive()));
        std::fs::write(&path, self.export_json()?)?;

        tracing::info!("Exported participants to {}", path.display());
        Ok(path)
    }

    pub fn clear_all(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("Cleared all participant data");
        Ok(())
    }

    pub fn participant_url(&self, participant_id: &str) -> String {
        link::participant_url(&self.config().base_url, participant_id)
    }

    pub fn qr_payload(&self, record: &ParticipantRecord) -> QrPayload {
        QrPayload::from(record)
    }
}

/// Per-team counts for `participants` under `config`.
pub fn usage_stats(
    config: &EventConfig,
    participants: &[ParticipantRecord],
) -> Result<UsageStats> {
    config.validate()?;

    let total_assigned = participants.len() as u32;
    let total_capacity = config.capacity();

    let team_stats = config
        .team_range()
        .map(|team_number| {
            let current_count = participants
                .iter()
                .filter(|p| p.team_number == team_number)
                .count() as u32;

            TeamStats {
                team_number,
                current_count,
                max_count: config.members_per_team,
                available: config.members_per_team.saturating_sub(current_count),
            }
        })
        .collect();

    Ok(UsageStats {
        total_assigned,
        total_capacity,
        available_slots: total_capacity.saturating_sub(total_assigned),
        team_stats,
    })
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("participants-{}.json", date.format("%Y-%m-%d"))
}
