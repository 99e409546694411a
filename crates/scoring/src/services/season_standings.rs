use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::models::{Angler, IndividualResult, PointsBasis, SeasonStanding, TournamentPoints};

#[derive(Default)]
struct Tally {
    total_points: i32,
    tournaments_fished: u32,
    buy_ins: u32,
    total_weight: Decimal,
}

/// Builds the Angler-of-the-Year table from scratch.
///
/// `allocations` are the per-tournament points of every points-eligible tournament in
/// the season; `results` supply the membership snapshot for award eligibility.
/// Sorted by points, then total weight, then tournaments fished. Anglers level on
/// all three share a rank and are listed by name.
pub fn compute_standings(
    allocations: &[TournamentPoints],
    results: &[&IndividualResult],
    anglers: &[&Angler],
) -> Result<Vec<SeasonStanding>> {
    let mut tallies: HashMap<Uuid, Tally> = HashMap::new();

    for allocation in allocations {
        for entry in &allocation.entries {
            let tally = tallies.entry(entry.angler_id).or_default();
            tally.total_points += entry.points;
            tally.total_weight += entry.net_weight;
            match entry.basis {
                PointsBasis::BuyIn => tally.buy_ins += 1,
                _ => tally.tournaments_fished += 1,
            }
        }
    }

    let counted: HashSet<Uuid> = allocations.iter().map(|a| a.tournament_id).collect();
    let award_eligible: HashSet<Uuid> = results
        .iter()
        .filter(|r| counted.contains(&r.tournament_id) && r.was_member_at_time && !r.buy_in)
        .map(|r| r.angler_id)
        .collect();

    let by_id: HashMap<Uuid, &Angler> = anglers.iter().map(|a| (a.angler_id, *a)).collect();

    let mut rows: Vec<(&Angler, Tally)> = tallies
        .into_iter()
        .map(|(angler_id, tally)| {
            by_id
                .get(&angler_id)
                .map(|angler| (*angler, tally))
                .ok_or(ScoringError::AnglerNotFound(angler_id))
        })
        .collect::<Result<_>>()?;

    rows.sort_by(|(a, x), (b, y)| {
        y.total_points
            .cmp(&x.total_points)
            .then_with(|| y.total_weight.cmp(&x.total_weight))
            .then_with(|| y.tournaments_fished.cmp(&x.tournaments_fished))
            .then_with(|| a.last_name.cmp(&b.last_name))
            .then_with(|| a.first_name.cmp(&b.first_name))
            .then_with(|| a.angler_id.cmp(&b.angler_id))
    });

    let mut standings: Vec<SeasonStanding> = Vec::with_capacity(rows.len());
    for (idx, (angler, tally)) in rows.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(prev)
                if prev.total_points == tally.total_points
                    && prev.total_weight == tally.total_weight
                    && prev.tournaments_fished == tally.tournaments_fished =>
            {
                prev.rank
            }
            _ => idx as u32 + 1,
        };

        standings.push(SeasonStanding {
            rank,
            angler_id: angler.angler_id,
            angler_name: angler.full_name(),
            total_points: tally.total_points,
            tournaments_fished: tally.tournaments_fished,
            buy_ins: tally.buy_ins,
            total_weight: tally.total_weight,
            award_eligible: award_eligible.contains(&angler.angler_id),
        });
    }

    debug!(
        "Season standings rebuilt from {} tournament(s): {} angler(s)",
        allocations.len(),
        standings.len()
    );

    Ok(standings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnglerPoints;

    fn lb(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn angler(first: &str, last: &str) -> Angler {
        Angler {
            angler_id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            is_member: true,
            is_guest: false,
        }
    }

    fn entry(angler: &Angler, points: i32, weight: &str, basis: PointsBasis) -> AnglerPoints {
        AnglerPoints {
            angler_id: angler.angler_id,
            points,
            basis,
            net_weight: lb(weight),
        }
    }

    fn allocation(entries: Vec<AnglerPoints>) -> TournamentPoints {
        TournamentPoints {
            tournament_id: Uuid::new_v4(),
            entries,
        }
    }

    #[test]
    fn test_totals_are_sums_of_tournament_points() {
        let ann = angler("Ann", "Baker");
        let bo = angler("Bo", "Carter");
        let allocations = vec![
            allocation(vec![
                entry(&ann, 100, "14.2", PointsBasis::Weighed),
                entry(&bo, 99, "11.0", PointsBasis::Weighed),
            ]),
            allocation(vec![
                entry(&bo, 100, "9.3", PointsBasis::Weighed),
                entry(&ann, 96, "0", PointsBasis::BuyIn),
            ]),
        ];

        let standings = compute_standings(&allocations, &[], &[&ann, &bo]).unwrap();
        assert_eq!(standings[0].angler_id, bo.angler_id);
        assert_eq!(standings[0].total_points, 199);
        assert_eq!(standings[0].total_weight, lb("20.3"));
        assert_eq!(standings[0].tournaments_fished, 2);
        assert_eq!(standings[1].total_points, 196);
        assert_eq!(standings[1].buy_ins, 1);
        assert_eq!(standings[1].tournament_count(), 2);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn test_point_tie_broken_by_weight_then_tournaments() {
        let ann = angler("Ann", "Baker");
        let bo = angler("Bo", "Carter");
        let cy = angler("Cy", "Dunn");
        let allocations = vec![
            allocation(vec![
                entry(&ann, 100, "10", PointsBasis::Weighed),
                entry(&bo, 100, "12", PointsBasis::Weighed),
                entry(&cy, 100, "10", PointsBasis::Weighed),
            ]),
            allocation(vec![entry(&cy, 0, "0", PointsBasis::Blank)]),
        ];

        let standings = compute_standings(&allocations, &[], &[&ann, &bo, &cy]).unwrap();
        let order: Vec<Uuid> = standings.iter().map(|s| s.angler_id).collect();
        assert_eq!(order, vec![bo.angler_id, cy.angler_id, ann.angler_id]);
        assert_eq!(
            standings.iter().map(|s| s.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_exact_tie_shares_rank() {
        let ann = angler("Ann", "Baker");
        let bo = angler("Bo", "Abbott");
        let cy = angler("Cy", "Dunn");
        let allocations = vec![allocation(vec![
            entry(&ann, 100, "10", PointsBasis::Weighed),
            entry(&bo, 100, "10", PointsBasis::Weighed),
            entry(&cy, 98, "8", PointsBasis::Weighed),
        ])];

        let standings = compute_standings(&allocations, &[], &[&ann, &bo, &cy]).unwrap();
        assert_eq!(standings[0].angler_id, bo.angler_id);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].rank, 1);
        assert_eq!(standings[2].rank, 3);
    }

    #[test]
    fn test_award_eligibility_from_membership_snapshot() {
        let member = angler("Ann", "Baker");
        let guest = angler("Gus", "Guest");
        let first = allocation(vec![
            entry(&member, 100, "10", PointsBasis::Weighed),
            entry(&guest, 99, "9", PointsBasis::Weighed),
        ]);
        let results = [
            IndividualResult::new(first.tournament_id, member.angler_id, true),
            IndividualResult::new(first.tournament_id, guest.angler_id, false),
        ];
        let refs: Vec<&IndividualResult> = results.iter().collect();

        let standings = compute_standings(&[first], &refs, &[&member, &guest]).unwrap();
        assert!(standings[0].award_eligible);
        assert!(!standings[1].award_eligible);
    }

    #[test]
    fn test_unknown_angler_is_reported() {
        let ghost = angler("No", "Body");
        let allocations = vec![allocation(vec![entry(&ghost, 100, "5", PointsBasis::Weighed)])];

        let err = compute_standings(&allocations, &[], &[]).unwrap_err();
        assert!(matches!(err, ScoringError::AnglerNotFound(id) if id == ghost.angler_id));
    }

    #[test]
    fn test_empty_season() {
        assert!(compute_standings(&[], &[], &[]).unwrap().is_empty());
    }
}
