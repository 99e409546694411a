use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::models::{
    AwardContender, AwardDraw, AwardKind, AwardOutcome, CoinFlipRecord, IndividualResult, Placing,
    TeamResult, Tournament,
};
use crate::services::award_tracking::DrawBook;
use crate::tie_break::TieBreaker;

/// Share of the purse paid to each place, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutSchedule {
    pub percentages: Vec<Decimal>,
}

impl Default for PayoutSchedule {
    fn default() -> Self {
        Self {
            percentages: vec![Decimal::from(50), Decimal::from(30), Decimal::from(20)],
        }
    }
}

impl PayoutSchedule {
    pub fn new(percentages: Vec<Decimal>) -> Result<Self> {
        let schedule = Self { percentages };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<()> {
        if self.percentages.iter().any(|p| *p <= Decimal::ZERO) {
            return Err(ScoringError::InvalidPayoutSchedule(
                "every paid place needs a positive share".to_string(),
            ));
        }
        let total: Decimal = self.percentages.iter().copied().sum();
        if total > Decimal::ONE_HUNDRED {
            return Err(ScoringError::InvalidPayoutSchedule(format!(
                "shares add up to {}%",
                total
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub place: u32,
    pub members: Vec<Uuid>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigBassPot {
    pub members: Vec<Uuid>,
    pub weight: Decimal,
    pub amount: Decimal,
    pub decided_by_coin_flip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentPayout {
    pub tournament_id: Uuid,
    pub purse: Decimal,
    pub payouts: Vec<Payout>,
    pub big_bass: AwardOutcome<BigBassPot>,
    /// Placing coin flips made for this payout that were not already on record
    #[serde(default)]
    pub new_coin_flips: Vec<CoinFlipRecord>,
    /// Big Bass pot draws made for this payout that were not already on record
    #[serde(default)]
    pub new_draws: Vec<AwardDraw>,
}

/// Entry fees collected for a tournament; buy-ins pay like everyone else.
pub fn tournament_purse(tournament: &Tournament, results: &[&IndividualResult]) -> Decimal {
    tournament.entry_fee * Decimal::from(results.len())
}

/// Big Bass pot fees, paid only by anglers who actually fished.
pub fn big_bass_pot_total(tournament: &Tournament, results: &[&IndividualResult]) -> Decimal {
    let fished = results.iter().filter(|r| !r.buy_in).count();
    tournament.big_bass_pot_fee * Decimal::from(fished)
}

/// Pays the purse down the prize-eligible placings in place order.
///
/// Amounts are rounded to cents and any rounding remainder goes to first place.
/// Places nobody is eligible for are simply not paid.
pub fn distribute_purse(
    placings: &[Placing],
    purse: Decimal,
    schedule: &PayoutSchedule,
) -> Result<Vec<Payout>> {
    schedule.validate()?;

    let mut eligible: Vec<&Placing> = placings.iter().filter(|p| p.prize_eligible).collect();
    eligible.sort_by_key(|p| p.place);

    let mut payouts: Vec<Payout> = eligible
        .iter()
        .zip(&schedule.percentages)
        .map(|(placing, share)| Payout {
            place: placing.place,
            members: placing.team.members.clone(),
            amount: (purse * *share / Decimal::ONE_HUNDRED).round_dp(2),
        })
        .collect();

    let scheduled: Decimal = schedule
        .percentages
        .iter()
        .take(payouts.len())
        .map(|share| purse * *share / Decimal::ONE_HUNDRED)
        .sum::<Decimal>()
        .round_dp(2);
    let paid: Decimal = payouts.iter().map(|p| p.amount).sum();
    if let Some(first) = payouts.first_mut() {
        first.amount += scheduled - paid;
    }

    debug!("Purse of {} paid across {} place(s)", purse, payouts.len());

    Ok(payouts)
}

/// Per-tournament Big Bass pot: heaviest qualifying fish on a pot-eligible boat.
pub fn tournament_big_bass(
    tournament: &Tournament,
    teams: &[TeamResult],
    pot: Decimal,
    draws: &mut DrawBook<'_>,
    tie_breaker: &mut dyn TieBreaker,
) -> AwardOutcome<BigBassPot> {
    let mut contenders: Vec<&TeamResult> = teams
        .iter()
        .filter(|t| {
            t.big_bass_pot_eligible && t.big_bass_weight > tournament.big_bass_qualifying_weight
        })
        .collect();

    let Some(best) = contenders.iter().map(|t| t.big_bass_weight).max() else {
        return AwardOutcome::Unawarded;
    };

    contenders.retain(|t| t.big_bass_weight == best);
    contenders.sort_by_key(|t| t.key());

    let keys: Vec<AwardContender> = contenders
        .iter()
        .map(|t| AwardContender {
            tournament_id: tournament.tournament_id,
            members: t.key(),
        })
        .collect();
    let decided_by_coin_flip = contenders.len() > 1;
    let pick = draws.settle(AwardKind::TournamentBigBass, &keys, tie_breaker);
    let winner = contenders[pick];

    AwardOutcome::Awarded(BigBassPot {
        members: winner.members.clone(),
        weight: winner.big_bass_weight,
        amount: pot,
        decided_by_coin_flip,
    })
}
