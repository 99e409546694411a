pub mod award_tracking;
pub mod payout;
pub mod penalty;
pub mod points_allocation;
pub mod result_validator;
pub mod scoring;
pub mod season_standings;
pub mod team_aggregation;
pub mod tournament_ranking;

pub use scoring::{ScoringService, ValidatedTournament};
