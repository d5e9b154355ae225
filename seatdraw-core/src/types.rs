use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One attendee's assignment. Created once by the allocator, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub id: String,
    pub team_number: u32,
    pub lottery_number: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team_number: u32,
    pub current_count: u32,
    pub max_count: u32,
    pub available: u32,
}

impl TeamStats {
    pub fn is_full(&self) -> bool {
        self.current_count >= self.max_count
    }

    pub fn is_empty(&self) -> bool {
        self.current_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub total_assigned: u32,
    pub total_capacity: u32,
    pub available_slots: u32,
    pub team_stats: Vec<TeamStats>,
}

impl UsageStats {
    /// Share of the capacity already handed out, in percent.
    pub fn fill_percent(&self) -> f64 {
        if self.total_capacity == 0 {
            return 0.0;
        }
        f64::from(self.total_assigned) / f64::from(self.total_capacity) * 100.0
    }
}
