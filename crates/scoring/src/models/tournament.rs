use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event configuration for one tournament day.
///
/// Everything except identity, season and date has a club default, so a snapshot
/// only has to spell out what differs from a regular five-fish team event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub tournament_id: Uuid,
    pub season_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    /// Unset until the lake poll is resolved
    #[serde(default)]
    pub lake: Option<String>,
    #[serde(default = "default_fish_limit")]
    pub fish_limit: u32,
    #[serde(default = "default_true")]
    pub points_eligible: bool,
    #[serde(default = "default_true")]
    pub is_team_format: bool,
    #[serde(default = "default_dead_fish_penalty")]
    pub dead_fish_penalty_per_fish: Decimal,
    #[serde(default = "default_big_bass_qualifying_weight")]
    pub big_bass_qualifying_weight: Decimal,
    /// Weights come from a length-to-weight chart instead of a scale
    #[serde(default)]
    pub is_paper_tournament: bool,
    #[serde(default)]
    pub entry_fee: Decimal,
    #[serde(default)]
    pub big_bass_pot_fee: Decimal,
}

pub const DEFAULT_FISH_LIMIT: u32 = 5;

fn default_fish_limit() -> u32 {
    DEFAULT_FISH_LIMIT
}

fn default_true() -> bool {
    true
}

fn default_dead_fish_penalty() -> Decimal {
    Decimal::new(25, 2)
}

fn default_big_bass_qualifying_weight() -> Decimal {
    Decimal::new(5, 0)
}

impl Tournament {
    pub fn new(season_id: Uuid, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            tournament_id: Uuid::new_v4(),
            season_id,
            name: name.into(),
            date,
            lake: None,
            fish_limit: default_fish_limit(),
            points_eligible: true,
            is_team_format: true,
            dead_fish_penalty_per_fish: default_dead_fish_penalty(),
            big_bass_qualifying_weight: default_big_bass_qualifying_weight(),
            is_paper_tournament: false,
            entry_fee: Decimal::ZERO,
            big_bass_pot_fee: Decimal::ZERO,
        }
    }

    pub fn counts_for_heavy_stringer(&self) -> bool {
        !self.is_paper_tournament
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults() {
        let json = r#"{
            "tournament_id": "00000000-0000-0000-0000-000000000001",
            "season_id": "00000000-0000-0000-0000-000000000002",
            "name": "March Open",
            "date": "2025-03-15"
        }"#;

        let tournament: Tournament = serde_json::from_str(json).unwrap();
        assert_eq!(tournament.fish_limit, 5);
        assert!(tournament.points_eligible);
        assert!(tournament.is_team_format);
        assert_eq!(tournament.dead_fish_penalty_per_fish, Decimal::new(25, 2));
        assert_eq!(tournament.big_bass_qualifying_weight, Decimal::new(5, 0));
        assert!(!tournament.is_paper_tournament);
        assert!(tournament.lake.is_none());
    }

    #[test]
    fn test_paper_tournament_excluded_from_heavy_stringer() {
        let mut tournament = Tournament::new(
            Uuid::new_v4(),
            "Paper Classic",
            NaiveDate::from_ymd_opt(2025, 1, 18).unwrap(),
        );
        assert!(tournament.counts_for_heavy_stringer());

        tournament.is_paper_tournament = true;
        assert!(!tournament.counts_for_heavy_stringer());
    }
}
