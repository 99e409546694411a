use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    AwardContender, AwardDraw, AwardKind, AwardOutcome, BigBassRecord, HeavyStringerRecord,
    IndividualResult, SeasonAwards, TeamKey, TeamResult, Tournament,
};
use crate::tie_break::TieBreaker;

/// Award draws on record plus the ones made while settling new ties.
pub struct DrawBook<'a> {
    recorded: &'a [AwardDraw],
    new_draws: Vec<AwardDraw>,
}

impl<'a> DrawBook<'a> {
    pub fn new(recorded: &'a [AwardDraw]) -> Self {
        Self {
            recorded,
            new_draws: Vec::new(),
        }
    }

    /// Index of the contender that takes the award. A tie already drawn for the
    /// same award is replayed; otherwise the tie-breaker picks and the draw is kept.
    pub fn settle(
        &mut self,
        award: AwardKind,
        contenders: &[AwardContender],
        tie_breaker: &mut dyn TieBreaker,
    ) -> usize {
        if contenders.len() <= 1 {
            return 0;
        }

        let recorded = self
            .recorded
            .iter()
            .chain(self.new_draws.iter())
            .find(|d| d.matches(award, contenders))
            .and_then(|d| contenders.iter().position(|c| *c == d.winner));
        if let Some(idx) = recorded {
            debug!("Replaying recorded {:?} draw between {} contender(s)", award, contenders.len());
            return idx;
        }

        let idx = tie_breaker.pick_one(contenders.len()).min(contenders.len() - 1);
        debug!("{:?} draw between {} contender(s): pick {}", award, contenders.len(), idx);
        self.new_draws
            .push(AwardDraw::new(award, contenders, contenders[idx].clone()));
        idx
    }

    pub fn into_new_draws(self) -> Vec<AwardDraw> {
        self.new_draws
    }
}

/// One tournament's validated results and the boats built from them.
pub struct TournamentCatch<'a> {
    pub tournament: &'a Tournament,
    pub results: Vec<&'a IndividualResult>,
    pub teams: Vec<TeamResult>,
}

impl TournamentCatch<'_> {
    fn team_of(&self, angler_id: Uuid) -> Option<&TeamResult> {
        self.teams.iter().find(|t| t.members.contains(&angler_id))
    }
}

/// Heaviest single fish of the season that beat its tournament's qualifying weight.
///
/// Only anglers who were members at the time, fishing a pot-eligible boat, qualify.
/// Paper tournaments count. A tie on weight is settled by a single season-end coin flip.
pub fn big_bass_of_year(
    catches: &[TournamentCatch<'_>],
    draws: &mut DrawBook<'_>,
    tie_breaker: &mut dyn TieBreaker,
) -> AwardOutcome<BigBassRecord> {
    let mut candidates: Vec<(&Tournament, &IndividualResult)> = Vec::new();

    for catch in catches {
        for result in &catch.results {
            let pot_eligible = catch
                .team_of(result.angler_id)
                .is_some_and(|t| t.big_bass_pot_eligible);

            if result.catch_counts()
                && result.was_member_at_time
                && pot_eligible
                && result.big_bass_weight > catch.tournament.big_bass_qualifying_weight
            {
                candidates.push((catch.tournament, *result));
            }
        }
    }

    let Some(best) = candidates.iter().map(|(_, r)| r.big_bass_weight).max() else {
        debug!("No fish beat the qualifying weight; Big Bass of the Year unawarded");
        return AwardOutcome::Unawarded;
    };

    let mut leaders: Vec<(&Tournament, &IndividualResult)> = candidates
        .into_iter()
        .filter(|(_, r)| r.big_bass_weight == best)
        .collect();
    leaders.sort_by_key(|(t, r)| (t.date, r.angler_id));

    let contenders: Vec<AwardContender> = leaders
        .iter()
        .map(|(t, r)| AwardContender {
            tournament_id: t.tournament_id,
            members: TeamKey::new([r.angler_id]),
        })
        .collect();
    let decided_by_coin_flip = leaders.len() > 1;
    let pick = draws.settle(AwardKind::BigBassOfYear, &contenders, tie_breaker);
    let (tournament, result) = leaders[pick];

    AwardOutcome::Awarded(BigBassRecord {
        angler_id: result.angler_id,
        tournament_id: tournament.tournament_id,
        weight: result.big_bass_weight,
        decided_by_coin_flip,
    })
}

/// Heaviest boat of the season on a scale.
///
/// Paper tournaments, eliminated boats, buy-ins and empty stringers never qualify.
/// Equal weights go to the bigger fish, then to a coin flip.
pub fn heavy_stringer_of_year(
    catches: &[TournamentCatch<'_>],
    draws: &mut DrawBook<'_>,
    tie_breaker: &mut dyn TieBreaker,
) -> AwardOutcome<HeavyStringerRecord> {
    let mut candidates: Vec<(&Tournament, &TeamResult)> = catches
        .iter()
        .filter(|c| c.tournament.counts_for_heavy_stringer())
        .flat_map(|c| c.teams.iter().map(move |t| (c.tournament, t)))
        .filter(|(_, t)| !t.all_disqualified && !t.buy_in && t.net_weight > Decimal::ZERO)
        .collect();

    let Some(best) = candidates
        .iter()
        .map(|(_, t)| (t.net_weight, t.big_bass_weight))
        .max()
    else {
        debug!("No qualifying stringer this season; Heavy Stringer of the Year unawarded");
        return AwardOutcome::Unawarded;
    };

    candidates.retain(|(_, t)| (t.net_weight, t.big_bass_weight) == best);
    candidates.sort_by_key(|(tournament, team)| (tournament.date, team.key()));

    let contenders: Vec<AwardContender> = candidates
        .iter()
        .map(|(t, team)| AwardContender {
            tournament_id: t.tournament_id,
            members: team.key(),
        })
        .collect();
    let decided_by_coin_flip = candidates.len() > 1;
    let pick = draws.settle(AwardKind::HeavyStringerOfYear, &contenders, tie_breaker);
    let (tournament, team) = candidates[pick];

    AwardOutcome::Awarded(HeavyStringerRecord {
        members: team.members.clone(),
        tournament_id: tournament.tournament_id,
        net_weight: team.net_weight,
        decided_by_coin_flip,
    })
}

pub fn compute_awards(
    season_id: Uuid,
    catches: &[TournamentCatch<'_>],
    recorded_draws: &[AwardDraw],
    tie_breaker: &mut dyn TieBreaker,
) -> SeasonAwards {
    let mut draws = DrawBook::new(recorded_draws);
    let big_bass = big_bass_of_year(catches, &mut draws, tie_breaker);
    let heavy_stringer = heavy_stringer_of_year(catches, &mut draws, tie_breaker);

    SeasonAwards {
        season_id,
        big_bass,
        heavy_stringer,
        new_draws: draws.into_new_draws(),
    }
}
