use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    CoinFlipRecord, Placing, TeamKey, TeamResult, TieBreak, Tournament, TournamentRanking,
};
use crate::policy::ScoringPolicy;
use crate::services::points_allocation::{Outcome, ladder};
use crate::tie_break::{TieBreaker, draw_order};

/// Orders the boats of one tournament into placings.
///
/// Heaviest net weight first. Equal weights go to the bigger single fish, and teams
/// still level after that are separated by a coin flip. A coin flip already on
/// record for the same set of teams is replayed rather than flipped again, so
/// re-ranking unchanged results gives the same placings.
pub struct TournamentRanker<'a> {
    tournament: &'a Tournament,
    policy: &'a ScoringPolicy,
    recorded_flips: &'a [CoinFlipRecord],
}

impl<'a> TournamentRanker<'a> {
    pub fn new(tournament: &'a Tournament, policy: &'a ScoringPolicy) -> Self {
        Self {
            tournament,
            policy,
            recorded_flips: &[],
        }
    }

    pub fn with_recorded_flips(mut self, recorded_flips: &'a [CoinFlipRecord]) -> Self {
        self.recorded_flips = recorded_flips;
        self
    }

    pub fn rank(&self, teams: Vec<TeamResult>, tie_breaker: &mut dyn TieBreaker) -> TournamentRanking {
        let mut buy_ins = Vec::new();
        let mut eliminated = Vec::new();
        let mut contenders = Vec::new();

        for team in teams {
            if team.buy_in {
                buy_ins.push(team);
            } else if team.all_disqualified {
                eliminated.push(team);
            } else {
                contenders.push(team);
            }
        }

        // Input order must not influence which index a coin flip lands on.
        contenders.sort_by_key(TeamResult::key);
        contenders.sort_by(|a, b| {
            b.net_weight
                .cmp(&a.net_weight)
                .then_with(|| b.big_bass_weight.cmp(&a.big_bass_weight))
        });
        eliminated.sort_by_key(TeamResult::key);
        buy_ins.sort_by_key(TeamResult::key);

        let mut ordered: Vec<(TeamResult, u32, TieBreak)> = Vec::with_capacity(contenders.len());
        let mut new_coin_flips = Vec::new();
        let mut tie_group = 0;

        for weight_group in group_by(contenders, |t| t.net_weight) {
            tie_group += 1;
            let contested = weight_group.len() > 1;

            for fish_group in group_by(weight_group, |t| t.big_bass_weight) {
                if fish_group.len() == 1 {
                    let tie_break = if contested { TieBreak::BigBass } else { TieBreak::None };
                    ordered.extend(fish_group.into_iter().map(|t| (t, tie_group, tie_break)));
                    continue;
                }

                let (resolved, new_flip) = self.resolve_coin_flip(fish_group, tie_breaker);
                new_coin_flips.extend(new_flip);
                ordered.extend(resolved.into_iter().map(|t| (t, tie_group, TieBreak::CoinFlip)));
            }
        }

        if !eliminated.is_empty() {
            tie_group += 1;
            ordered.extend(eliminated.into_iter().map(|t| (t, tie_group, TieBreak::None)));
        }

        let points = self.team_points(&ordered);

        let placings: Vec<Placing> = ordered
            .into_iter()
            .zip(points)
            .enumerate()
            .map(|(idx, ((team, tie_group, tie_break), points))| Placing {
                place: idx as u32 + 1,
                tie_group,
                tie_break,
                prize_eligible: !team.all_disqualified && team.net_weight > Decimal::ZERO,
                points,
                team,
            })
            .collect();

        debug!(
            "Ranked {} team(s) for tournament '{}' ({} buy-in(s), {} new coin flip(s))",
            placings.len(),
            self.tournament.name,
            buy_ins.len(),
            new_coin_flips.len()
        );

        TournamentRanking {
            tournament_id: self.tournament.tournament_id,
            placings,
            buy_ins,
            new_coin_flips,
        }
    }

    fn resolve_coin_flip(
        &self,
        tied: Vec<TeamResult>,
        tie_breaker: &mut dyn TieBreaker,
    ) -> (Vec<TeamResult>, Option<CoinFlipRecord>) {
        let keys: Vec<TeamKey> = tied.iter().map(TeamResult::key).collect();

        if let Some(record) = self.recorded_flips.iter().find(|r| r.matches(&keys)) {
            debug!("Replaying recorded coin flip between {} team(s)", keys.len());
            let mut tied = tied;
            tied.sort_by_key(|t| {
                let key = t.key();
                record.order.iter().position(|k| *k == key)
            });
            return (tied, None);
        }

        let order = draw_order(tie_breaker, tied.len());
        debug!("Coin flip between {} team(s): order {:?}", tied.len(), order);

        let mut slots: Vec<Option<TeamResult>> = tied.into_iter().map(Some).collect();
        let resolved: Vec<TeamResult> = order
            .iter()
            .filter_map(|&idx| slots[idx].take())
            .collect();
        let record = CoinFlipRecord::new(resolved.iter().map(TeamResult::key).collect());

        (resolved, Some(record))
    }

    fn team_points(&self, ordered: &[(TeamResult, u32, TieBreak)]) -> Vec<Option<i32>> {
        if !self.tournament.points_eligible {
            return vec![None; ordered.len()];
        }

        let outcomes: Vec<Outcome> = ordered
            .iter()
            .map(|(team, _, _)| {
                if team.all_disqualified {
                    Outcome::Disqualified
                } else if team.net_weight > Decimal::ZERO {
                    Outcome::Weighed(team.net_weight)
                } else {
                    Outcome::Blank
                }
            })
            .collect();

        ladder(&outcomes, self.policy).into_iter().map(Some).collect()
    }
}

/// Splits an already sorted list into runs sharing the same key.
fn group_by<T, K: PartialEq>(items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<Vec<T>> {
    let mut groups: Vec<Vec<T>> = Vec::new();

    for item in items {
        match groups.last_mut() {
            Some(group) if key(&group[0]) == key(&item) => group.push(item),
            _ => groups.push(vec![item]),
        }
    }

    groups
}
