use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::team::TeamKey;

/// Outcome of an award that may legitimately go to nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "record", rename_all = "snake_case")]
pub enum AwardOutcome<T> {
    Awarded(T),
    Unawarded,
}

impl<T> AwardOutcome<T> {
    pub fn is_awarded(&self) -> bool {
        matches!(self, AwardOutcome::Awarded(_))
    }

    pub fn as_awarded(&self) -> Option<&T> {
        match self {
            AwardOutcome::Awarded(record) => Some(record),
            AwardOutcome::Unawarded => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigBassRecord {
    pub angler_id: Uuid,
    pub tournament_id: Uuid,
    pub weight: Decimal,
    pub decided_by_coin_flip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeavyStringerRecord {
    pub members: Vec<Uuid>,
    pub tournament_id: Uuid,
    pub net_weight: Decimal,
    pub decided_by_coin_flip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAwards {
    pub season_id: Uuid,
    pub big_bass: AwardOutcome<BigBassRecord>,
    pub heavy_stringer: AwardOutcome<HeavyStringerRecord>,
    /// Award draws made during this run that were not already on record
    #[serde(default)]
    pub new_draws: Vec<AwardDraw>,
}

/// Award a draw was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
    BigBassOfYear,
    HeavyStringerOfYear,
    TournamentBigBass,
}

/// One entry in an award tie: the boat or angler and the tournament it fished.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AwardContender {
    pub tournament_id: Uuid,
    pub members: TeamKey,
}

/// A coin flip already made for an award tie.
///
/// Replayed whenever the same contenders tie for the same award again, so the
/// season-end flip happens exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardDraw {
    pub award: AwardKind,
    pub contenders: Vec<AwardContender>,
    pub winner: AwardContender,
}

impl AwardDraw {
    pub fn new(award: AwardKind, contenders: &[AwardContender], winner: AwardContender) -> Self {
        let mut contenders = contenders.to_vec();
        contenders.sort();
        Self {
            award,
            contenders,
            winner,
        }
    }

    pub fn matches(&self, award: AwardKind, contenders: &[AwardContender]) -> bool {
        let mut sorted = contenders.to_vec();
        sorted.sort();
        self.award == award && self.contenders == sorted
    }
}
