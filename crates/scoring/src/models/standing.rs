use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the Angler-of-the-Year table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStanding {
    pub rank: u32,
    pub angler_id: Uuid,
    pub angler_name: String,
    pub total_points: i32,
    pub tournaments_fished: u32,
    pub buy_ins: u32,
    pub total_weight: Decimal,
    /// Fished at least once as a member
    pub award_eligible: bool,
}

impl SeasonStanding {
    pub fn tournament_count(&self) -> u32 {
        self.tournaments_fished + self.buy_ins
    }
}
