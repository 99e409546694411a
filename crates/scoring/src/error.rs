use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid team: {0}")]
    InvalidTeam(String),

    #[error("Duplicate result for angler {angler_id} in tournament {tournament_id}")]
    DuplicateResult { tournament_id: Uuid, angler_id: Uuid },

    #[error("Tournament not found: {0}")]
    TournamentNotFound(Uuid),

    #[error("Season not found: {0}")]
    SeasonNotFound(Uuid),

    #[error("Angler not found: {0}")]
    AnglerNotFound(Uuid),

    #[error("Invalid payout schedule: {0}")]
    InvalidPayoutSchedule(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ScoringError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScoringError::TournamentNotFound(_)
                | ScoringError::SeasonNotFound(_)
                | ScoringError::AnglerNotFound(_)
        )
    }
}

/// A single result rejected before scoring, with every rule it broke.
#[derive(Debug)]
pub struct ValidationError {
    pub tournament_id: Uuid,
    pub angler_id: Uuid,
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(
            f,
            "Result for angler {} in tournament {} failed with {} violation(s): {}",
            self.angler_id,
            self.tournament_id,
            self.violations.len(),
            details
        )
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("fish count {caught} exceeds limit of {limit}")]
    FishOverLimit { caught: u32, limit: u32 },

    #[error("negative gross weight {0}")]
    NegativeGrossWeight(Decimal),

    #[error("negative big bass weight {0}")]
    NegativeBigBassWeight(Decimal),

    #[error("big bass weight {big_bass} exceeds gross weight {gross}")]
    BigBassExceedsGross { big_bass: Decimal, gross: Decimal },

    #[error("buy-in recorded with a catch ({fish} fish, {weight} lb, {dead} dead)")]
    BuyInWithCatch { fish: u32, weight: Decimal, dead: u32 },

    #[error("dead fish count {dead} exceeds fish caught {caught}")]
    DeadFishExceedCatch { dead: u32, caught: u32 },

    #[error("gross weight {0} recorded with zero fish")]
    WeightWithoutFish(Decimal),

    #[error("guest limit reached: {prior} prior guest appearances this season")]
    GuestLimitExceeded { prior: u32 },

    #[error("result belongs to tournament {0}")]
    WrongTournament(Uuid),
}
