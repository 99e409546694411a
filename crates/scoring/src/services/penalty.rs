use rust_decimal::Decimal;

use crate::models::{IndividualResult, Tournament};

/// Weight deducted for dead fish, as entered. Kept apart from gross weight for audit.
pub fn penalty(result: &IndividualResult, tournament: &Tournament) -> Decimal {
    Decimal::from(result.dead_fish_count) * tournament.dead_fish_penalty_per_fish
}

/// Weight that counts toward rankings and points.
///
/// Zero for disqualified anglers and buy-ins; otherwise gross minus the dead fish
/// penalty, floored at zero.
pub fn net_weight(result: &IndividualResult, tournament: &Tournament) -> Decimal {
    if !result.catch_counts() {
        return Decimal::ZERO;
    }

    (result.gross_weight - penalty(result, tournament)).max(Decimal::ZERO)
}
