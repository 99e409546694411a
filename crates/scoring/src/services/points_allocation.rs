use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{AnglerPoints, IndividualResult, PointsBasis, TournamentPoints, Tournament};
use crate::policy::{DisqualifiedPoints, ScoringPolicy};
use crate::services::penalty::net_weight;

/// What an entrant brought to the scale, as far as the points ladder cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Weighed(Decimal),
    Blank,
    BuyIn,
    Disqualified,
}

impl Outcome {
    pub fn of_result(result: &IndividualResult, tournament: &Tournament) -> Self {
        if result.disqualified {
            return Outcome::Disqualified;
        }
        if result.buy_in {
            return Outcome::BuyIn;
        }
        let net = net_weight(result, tournament);
        if net > Decimal::ZERO {
            Outcome::Weighed(net)
        } else {
            Outcome::Blank
        }
    }

    pub fn basis(&self) -> PointsBasis {
        match self {
            Outcome::Weighed(_) => PointsBasis::Weighed,
            Outcome::Blank => PointsBasis::Blank,
            Outcome::BuyIn => PointsBasis::BuyIn,
            Outcome::Disqualified => PointsBasis::Disqualified,
        }
    }
}

/// Points for each outcome, in input order.
///
/// Weighed entrants get `first_place_points` minus the number of entrants with a
/// strictly heavier weight, so tied entrants share a value and the next weight
/// skips past them (100, 100, 98). Everyone else is placed relative to the lowest
/// weighed value; with nobody weighing fish that reference is `first_place_points`.
/// Points never go below zero.
pub fn ladder(outcomes: &[Outcome], policy: &ScoringPolicy) -> Vec<i32> {
    let weights: Vec<Decimal> = outcomes
        .iter()
        .filter_map(|o| match o {
            Outcome::Weighed(w) => Some(*w),
            _ => None,
        })
        .collect();

    let weighed_points = |weight: Decimal| -> i32 {
        let heavier = weights.iter().filter(|w| **w > weight).count() as i32;
        policy.first_place_points - heavier
    };

    let lowest = weights
        .iter()
        .map(|w| weighed_points(*w))
        .min()
        .unwrap_or(policy.first_place_points);
    let blank = lowest - policy.blank_offset;
    let buy_in = lowest - policy.buy_in_offset;
    let disqualified = match policy.disqualified {
        DisqualifiedPoints::SameAsBlank => blank,
        DisqualifiedPoints::OneBelowBlank => blank - 1,
    };

    outcomes
        .iter()
        .map(|outcome| {
            let points = match outcome {
                Outcome::Weighed(w) => weighed_points(*w),
                Outcome::Blank => blank,
                Outcome::BuyIn => buy_in,
                Outcome::Disqualified => disqualified,
            };
            points.max(0)
        })
        .collect()
}

/// Angler-of-the-Year points for one tournament, per individual angler.
///
/// Individual net weights are ranked against each other regardless of who shared a
/// boat. Tournaments that do not count toward the season yield an empty allocation.
/// No randomness is involved: weight ties share points.
pub fn allocate_points(
    tournament: &Tournament,
    results: &[&IndividualResult],
    policy: &ScoringPolicy,
) -> TournamentPoints {
    if !tournament.points_eligible {
        debug!(
            "Tournament '{}' is not points eligible, no points allocated",
            tournament.name
        );
        return TournamentPoints::empty(tournament.tournament_id);
    }

    if results.is_empty() {
        warn!(
            "Points eligible tournament '{}' has no results; it contributes nothing to standings",
            tournament.name
        );
        return TournamentPoints::empty(tournament.tournament_id);
    }

    let outcomes: Vec<Outcome> = results
        .iter()
        .map(|r| Outcome::of_result(r, tournament))
        .collect();
    let points = ladder(&outcomes, policy);

    let mut entries: Vec<AnglerPoints> = results
        .iter()
        .zip(outcomes.iter().zip(points))
        .map(|(result, (outcome, points))| AnglerPoints {
            angler_id: result.angler_id,
            points,
            basis: outcome.basis(),
            net_weight: net_weight(result, tournament),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.net_weight.cmp(&a.net_weight))
            .then_with(|| a.angler_id.cmp(&b.angler_id))
    });

    debug!(
        "Allocated points to {} angler(s) for tournament '{}'",
        entries.len(),
        tournament.name
    );

    TournamentPoints {
        tournament_id: tournament.tournament_id,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn lb(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn tournament() -> Tournament {
        Tournament::new(
            Uuid::new_v4(),
            "July Slam",
            NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(),
        )
    }

    fn weighed(t: &Tournament, gross: &str) -> IndividualResult {
        IndividualResult::new(t.tournament_id, Uuid::new_v4(), true).with_catch(
            3,
            lb(gross),
            Decimal::ZERO,
        )
    }

    #[test]
    fn test_ties_share_points_and_next_weight_skips() {
        let policy = ScoringPolicy::default();
        let outcomes = [
            Outcome::Weighed(lb("10.0")),
            Outcome::Weighed(lb("10.0")),
            Outcome::Weighed(lb("8.0")),
        ];
        assert_eq!(ladder(&outcomes, &policy), vec![100, 100, 98]);
    }

    #[test]
    fn test_three_way_tie() {
        let policy = ScoringPolicy::default();
        let outcomes = [
            Outcome::Weighed(lb("12")),
            Outcome::Weighed(lb("9")),
            Outcome::Weighed(lb("9")),
            Outcome::Weighed(lb("9")),
            Outcome::Weighed(lb("7")),
        ];
        assert_eq!(ladder(&outcomes, &policy), vec![100, 99, 99, 99, 96]);
    }

    #[test]
    fn test_blank_buy_in_and_disqualified_relative_to_lowest() {
        let policy = ScoringPolicy::default();
        let mut outcomes = vec![Outcome::Weighed(lb("20"))];
        outcomes.extend((1..=5).map(|i| Outcome::Weighed(Decimal::from(20 - i))));
        outcomes.extend([Outcome::Blank, Outcome::BuyIn, Outcome::Disqualified]);

        let points = ladder(&outcomes, &policy);
        assert_eq!(points[5], 95);
        assert_eq!(points[6], 93);
        assert_eq!(points[7], 91);
        assert_eq!(points[8], 93);

        let strict = policy.with_disqualified(DisqualifiedPoints::OneBelowBlank);
        assert_eq!(ladder(&outcomes, &strict)[8], 92);
    }

    #[test]
    fn test_nobody_weighed() {
        let policy = ScoringPolicy::default();
        let outcomes = [Outcome::Blank, Outcome::BuyIn];
        assert_eq!(ladder(&outcomes, &policy), vec![98, 96]);
    }

    #[test]
    fn test_points_never_negative() {
        let policy = ScoringPolicy {
            first_place_points: 3,
            ..ScoringPolicy::default()
        };
        let outcomes = [
            Outcome::Weighed(lb("5")),
            Outcome::Weighed(lb("4")),
            Outcome::BuyIn,
        ];
        assert_eq!(ladder(&outcomes, &policy), vec![3, 2, 0]);
    }

    #[test]
    fn test_allocate_points_scenario_a() {
        let t = tournament();
        let a = weighed(&t, "10.0");
        let b = weighed(&t, "10.0");
        let c = weighed(&t, "8.0");

        let points = allocate_points(&t, &[&a, &b, &c], &ScoringPolicy::default());
        assert_eq!(points.points_for(a.angler_id), Some(100));
        assert_eq!(points.points_for(b.angler_id), Some(100));
        assert_eq!(points.points_for(c.angler_id), Some(98));
    }

    #[test]
    fn test_buy_in_gets_lowest_minus_four() {
        let t = tournament();
        let mut results: Vec<IndividualResult> = (0..6)
            .map(|i| weighed(&t, &format!("{}.5", 12 - i)))
            .collect();
        let buy_in = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true).with_buy_in();
        results.push(buy_in.clone());
        let refs: Vec<&IndividualResult> = results.iter().collect();

        let points = allocate_points(&t, &refs, &ScoringPolicy::default());
        assert_eq!(points.points_for(results[5].angler_id), Some(95));
        assert_eq!(points.points_for(buy_in.angler_id), Some(91));
        let entry = points
            .entries
            .iter()
            .find(|e| e.angler_id == buy_in.angler_id)
            .unwrap();
        assert_eq!(entry.basis, PointsBasis::BuyIn);
        assert_eq!(entry.net_weight, Decimal::ZERO);
    }

    #[test]
    fn test_penalized_to_zero_counts_as_blank() {
        let mut t = tournament();
        t.dead_fish_penalty_per_fish = lb("1");
        let leader = weighed(&t, "9");
        let wiped = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_catch(2, lb("1.5"), lb("1"))
            .with_dead_fish(2);

        let points = allocate_points(&t, &[&leader, &wiped], &ScoringPolicy::default());
        assert_eq!(points.points_for(wiped.angler_id), Some(98));
    }

    #[test]
    fn test_disqualified_policy_flag() {
        let t = tournament();
        let leader = weighed(&t, "9");
        let cheat = weighed(&t, "30").with_disqualification();
        let refs = [&leader, &cheat];

        let same = allocate_points(&t, &refs, &ScoringPolicy::default());
        assert_eq!(same.points_for(cheat.angler_id), Some(98));

        let below = allocate_points(
            &t,
            &refs,
            &ScoringPolicy::default().with_disqualified(DisqualifiedPoints::OneBelowBlank),
        );
        assert_eq!(below.points_for(cheat.angler_id), Some(97));
    }

    #[test]
    fn test_not_points_eligible_or_empty() {
        let mut t = tournament();
        assert!(allocate_points(&t, &[], &ScoringPolicy::default()).is_empty());

        t.points_eligible = false;
        let a = weighed(&t, "9");
        assert!(allocate_points(&t, &[&a], &ScoringPolicy::default()).is_empty());
    }

    #[test]
    fn test_allocation_is_idempotent() {
        let t = tournament();
        let results: Vec<IndividualResult> = ["4.2", "7.7", "7.7", "0"]
            .iter()
            .map(|w| {
                if *w == "0" {
                    IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
                } else {
                    weighed(&t, w)
                }
            })
            .collect();
        let refs: Vec<&IndividualResult> = results.iter().collect();
        let policy = ScoringPolicy::default();

        assert_eq!(
            allocate_points(&t, &refs, &policy),
            allocate_points(&t, &refs, &policy)
        );
    }
}
