use crate::error::{Result, SeatdrawError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const DEFAULT_TEAM_COUNT: u32 = 9;
pub const DEFAULT_MEMBERS_PER_TEAM: u32 = 10;
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_STORAGE_KEY: &str = "year-end-party-participants";

/// Env var consulted for the public base URL of participant links.
pub const BASE_URL_ENV: &str = "SEATDRAW_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub team_count: u32,
    pub members_per_team: u32,
    pub base_url: String,
    pub storage_key: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            team_count: DEFAULT_TEAM_COUNT,
            members_per_team: DEFAULT_MEMBERS_PER_TEAM,
            base_url: std::env::var(BASE_URL_ENV)
                .ok()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl EventConfig {
    pub fn new(team_count: u32, members_per_team: u32) -> Self {
        Self {
            team_count,
            members_per_team,
            ..Self::default()
        }
    }

    /// Total number of seats, which is also the size of the lottery number space.
    ///
    /// Saturates for configs that fail [`validate`](Self::validate).
    pub fn capacity(&self) -> u32 {
        self.team_count.saturating_mul(self.members_per_team)
    }

    pub fn team_range(&self) -> RangeInclusive<u32> {
        1..=self.team_count
    }

    pub fn lottery_range(&self) -> RangeInclusive<u32> {
        1..=self.capacity()
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_count == 0 {
            return Err(SeatdrawError::config("Team count must be greater than 0"));
        }

        if self.members_per_team == 0 {
            return Err(SeatdrawError::config(
                "Members per team must be greater than 0",
            ));
        }

        if self.team_count.checked_mul(self.members_per_team).is_none() {
            return Err(SeatdrawError::config(format!(
                "{} teams of {} members overflows the lottery number space",
                self.team_count, self.members_per_team
            )));
        }

        if self.base_url.is_empty() {
            return Err(SeatdrawError::config("Base URL cannot be empty"));
        }

        if self.storage_key.is_empty() {
            return Err(SeatdrawError::config("Storage key cannot be empty"));
        }

        Ok(())
    }
}
