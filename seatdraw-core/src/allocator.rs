//! Team and lottery-number allocation.
//!
//! Teams are capped at `members_per_team` each. Lottery numbers come from
//! one shared pool `1..=team_count * members_per_team` for the whole event,
//! so they are unique across teams.

use crate::config::EventConfig;
use crate::error::{Result, SeatdrawError};
use crate::types::ParticipantRecord;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Allocator {
    config: EventConfig,
}

impl Allocator {
    pub fn new(config: EventConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// Allocate using the thread RNG. Nothing is persisted.
    pub fn allocate(&self, existing: &[ParticipantRecord]) -> Result<ParticipantRecord> {
        self.allocate_with_rng(existing, &mut rand::thread_rng())
    }

    pub fn allocate_with_rng<R: Rng + ?Sized>(
        &self,
        existing: &[ParticipantRecord],
        rng: &mut R,
    ) -> Result<ParticipantRecord> {
        let capacity = self.config.capacity();
        if existing.len() >= capacity as usize {
            return Err(SeatdrawError::CapacityExhausted { capacity });
        }

        let team_number = *self
            .eligible_teams(existing)
            .choose(rng)
            .ok_or(SeatdrawError::CapacityExhausted { capacity })?;

        let lottery_number = *self
            .available_lottery_numbers(existing)
            .choose(rng)
            .ok_or(SeatdrawError::NumberSpaceExhausted { max: capacity })?;

        let record = ParticipantRecord {
            id: Uuid::new_v4().to_string(),
            team_number,
            lottery_number,
            created_at: Utc::now(),
        };

        tracing::info!(
            "Allocated participant {}: team {}, lottery number {}",
            record.id,
            team_number,
            lottery_number
        );
        Ok(record)
    }

    /// Members currently assigned to each team in `1..=team_count`.
    pub fn team_occupancy(&self, existing: &[ParticipantRecord]) -> HashMap<u32, u32> {
        let mut occupancy: HashMap<u32, u32> =
            self.config.team_range().map(|team| (team, 0)).collect();
        for record in existing {
            if let Some(count) = occupancy.get_mut(&record.team_number) {
                *count += 1;
            }
        }
        occupancy
    }

    /// Teams with at least one free seat, ascending.
    pub fn eligible_teams(&self, existing: &[ParticipantRecord]) -> Vec<u32> {
        let occupancy = self.team_occupancy(existing);
        let limit = self.config.members_per_team;
        self.config
            .team_range()
            .filter(|team| occupancy.get(team).copied().unwrap_or(0) < limit)
            .collect()
    }

    /// Unused lottery numbers, ascending.
    pub fn available_lottery_numbers(&self, existing: &[ParticipantRecord]) -> Vec<u32> {
        let used: HashSet<u32> = existing.iter().map(|r| r.lottery_number).collect();
        self.config
            .lottery_range()
            .filter(|n| !used.contains(n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(team: u32, lottery: u32) -> ParticipantRecord {
        ParticipantRecord {
            id: Uuid::new_v4().to_string(),
            team_number: team,
            lottery_number: lottery,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fills_default_event_exactly() {
        let allocator = Allocator::new(EventConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut records = Vec::new();

        for _ in 0..90 {
            let rec = allocator.allocate_with_rng(&records, &mut rng).unwrap();
            records.push(rec);

            let occupancy = allocator.team_occupancy(&records);
            assert!(occupancy.values().all(|&count| count <= 10));
        }

        let mut numbers: Vec<u32> = records.iter().map(|r| r.lottery_number).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=90).collect::<Vec<_>>());

        let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 90);

        assert!(matches!(
            allocator.allocate_with_rng(&records, &mut rng),
            Err(SeatdrawError::CapacityExhausted { capacity: 90 })
        ));
    }

    #[test]
    fn test_skips_full_teams() {
        let allocator = Allocator::new(EventConfig::new(2, 2)).unwrap();
        let existing = vec![record(1, 1), record(1, 2)];

        assert_eq!(allocator.eligible_teams(&existing), vec![2]);
        for _ in 0..20 {
            let rec = allocator.allocate(&existing).unwrap();
            assert_eq!(rec.team_number, 2);
            assert!(rec.lottery_number == 3 || rec.lottery_number == 4);
        }
    }

    #[test]
    fn test_lottery_numbers_are_shared_across_teams() {
        let allocator = Allocator::new(EventConfig::new(3, 1)).unwrap();
        let existing = vec![record(1, 2)];

        assert_eq!(allocator.available_lottery_numbers(&existing), vec![1, 3]);
        let rec = allocator.allocate(&existing).unwrap();
        assert_ne!(rec.team_number, 1);
        assert_ne!(rec.lottery_number, 2);
    }

    #[test]
    fn test_out_of_range_teams_do_not_take_seats() {
        let allocator = Allocator::new(EventConfig::new(1, 2)).unwrap();
        let existing = vec![record(5, 1)];

        assert_eq!(allocator.team_occupancy(&existing).get(&1), Some(&0));
        assert_eq!(allocator.eligible_teams(&existing), vec![1]);

        let rec = allocator.allocate(&existing).unwrap();
        assert_eq!(rec.team_number, 1);
        assert_eq!(rec.lottery_number, 2);
    }

    #[test]
    fn test_every_record_counts_toward_capacity() {
        // Records outside the team range hold no seat but still count as assigned.
        let allocator = Allocator::new(EventConfig::new(2, 1)).unwrap();
        let existing = vec![record(9, 1), record(9, 2)];

        assert_eq!(allocator.eligible_teams(&existing), vec![1, 2]);
        assert!(matches!(
            allocator.allocate(&existing),
            Err(SeatdrawError::CapacityExhausted { capacity: 2 })
        ));
    }

    #[test]
    fn test_oversized_event_is_rejected_up_front() {
        assert!(matches!(
            Allocator::new(EventConfig::new(u32::MAX, 2)),
            Err(SeatdrawError::Config(_))
        ));
        assert!(Allocator::new(EventConfig::new(0, 10)).is_err());
    }
}
