use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::team::{TeamKey, TeamResult};

/// How a placing was separated from the teams it tied with on net weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    None,
    BigBass,
    CoinFlip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placing {
    pub place: u32,
    /// Teams with equal net weight share a group, even once the tie is broken
    pub tie_group: u32,
    pub tie_break: TieBreak,
    pub team: TeamResult,
    pub prize_eligible: bool,
    /// Team ladder value; only set for points-eligible tournaments
    pub points: Option<i32>,
}

/// A coin flip that has already been made for a set of tied teams.
///
/// Stored alongside the results so a later re-rank replays it instead of flipping again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinFlipRecord {
    pub contenders: Vec<TeamKey>,
    pub order: Vec<TeamKey>,
}

impl CoinFlipRecord {
    pub fn new(order: Vec<TeamKey>) -> Self {
        let mut contenders = order.clone();
        contenders.sort();
        Self { contenders, order }
    }

    pub fn matches(&self, contenders: &[TeamKey]) -> bool {
        let mut sorted = contenders.to_vec();
        sorted.sort();
        self.contenders == sorted
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentRanking {
    pub tournament_id: Uuid,
    pub placings: Vec<Placing>,
    /// Teams that bought in; kept for points, never placed
    pub buy_ins: Vec<TeamResult>,
    /// Coin flips made during this run that were not already on record
    pub new_coin_flips: Vec<CoinFlipRecord>,
}

impl TournamentRanking {
    pub fn winner(&self) -> Option<&Placing> {
        self.placings.iter().find(|p| p.place == 1)
    }

    pub fn placing_for(&self, angler_id: Uuid) -> Option<&Placing> {
        self.placings
            .iter()
            .find(|p| p.team.members.contains(&angler_id))
    }
}
