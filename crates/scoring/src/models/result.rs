use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One angler's weigh-in for one tournament, exactly as entered.
///
/// Gross weight and dead fish are kept separately so the penalty stays auditable;
/// net weight is always derived, see [`crate::services::penalty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualResult {
    pub tournament_id: Uuid,
    pub angler_id: Uuid,
    #[serde(default)]
    pub num_fish_caught: u32,
    #[serde(default)]
    pub gross_weight: Decimal,
    #[serde(default)]
    pub big_bass_weight: Decimal,
    #[serde(default)]
    pub dead_fish_count: u32,
    #[serde(default)]
    pub disqualified: bool,
    /// Paid entry without fishing
    #[serde(default)]
    pub buy_in: bool,
    /// Membership as of the tournament date, not as of today
    pub was_member_at_time: bool,
}

impl IndividualResult {
    pub fn new(tournament_id: Uuid, angler_id: Uuid, was_member_at_time: bool) -> Self {
        Self {
            tournament_id,
            angler_id,
            num_fish_caught: 0,
            gross_weight: Decimal::ZERO,
            big_bass_weight: Decimal::ZERO,
            dead_fish_count: 0,
            disqualified: false,
            buy_in: false,
            was_member_at_time,
        }
    }

    pub fn with_catch(mut self, fish: u32, gross_weight: Decimal, big_bass_weight: Decimal) -> Self {
        self.num_fish_caught = fish;
        self.gross_weight = gross_weight;
        self.big_bass_weight = big_bass_weight;
        self
    }

    pub fn with_dead_fish(mut self, dead_fish_count: u32) -> Self {
        self.dead_fish_count = dead_fish_count;
        self
    }

    pub fn with_disqualification(mut self) -> Self {
        self.disqualified = true;
        self
    }

    pub fn with_buy_in(mut self) -> Self {
        self.buy_in = true;
        self
    }

    /// Whether this angler's catch is counted at all.
    pub fn catch_counts(&self) -> bool {
        !self.disqualified && !self.buy_in
    }
}
