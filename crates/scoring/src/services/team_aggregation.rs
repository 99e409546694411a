use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::models::{IndividualResult, TeamResult, Tournament};
use crate::services::penalty::net_weight;

pub const MAX_TEAM_SIZE: usize = 2;

/// Combines one or two anglers sharing a boat into a single team entry.
///
/// A disqualified member only zeroes their own catch. The team big bass is the
/// heaviest fish among members whose catch counts, since one fish per boat goes to
/// the pot. At least one counting member must have been a club member at the time
/// for the team to collect the Big Bass pot.
pub fn aggregate_team(tournament: &Tournament, members: &[&IndividualResult]) -> Result<TeamResult> {
    if members.is_empty() {
        return Err(ScoringError::InvalidTeam("a team needs at least one angler".to_string()));
    }
    if members.len() > MAX_TEAM_SIZE {
        return Err(ScoringError::InvalidTeam(format!(
            "a boat holds at most {} anglers, got {}",
            MAX_TEAM_SIZE,
            members.len()
        )));
    }

    let mut seen = HashSet::new();
    for member in members {
        if member.tournament_id != tournament.tournament_id {
            return Err(ScoringError::InvalidTeam(format!(
                "angler {} has a result for tournament {}, not {}",
                member.angler_id, member.tournament_id, tournament.tournament_id
            )));
        }
        if !seen.insert(member.angler_id) {
            return Err(ScoringError::InvalidTeam(format!(
                "angler {} listed twice in one boat",
                member.angler_id
            )));
        }
    }

    let net_weight = members
        .iter()
        .map(|m| net_weight(m, tournament))
        .sum::<Decimal>();
    let fish_count = members.iter().map(|m| m.num_fish_caught).sum();
    let big_bass_weight = members
        .iter()
        .filter(|m| m.catch_counts())
        .map(|m| m.big_bass_weight)
        .max()
        .unwrap_or(Decimal::ZERO);
    let all_disqualified = members.iter().all(|m| m.disqualified);
    let buy_in = members.iter().all(|m| m.buy_in);
    let big_bass_pot_eligible = members
        .iter()
        .any(|m| m.catch_counts() && m.was_member_at_time);

    Ok(TeamResult {
        tournament_id: tournament.tournament_id,
        members: members.iter().map(|m| m.angler_id).collect(),
        net_weight,
        fish_count,
        big_bass_weight,
        all_disqualified,
        buy_in,
        big_bass_pot_eligible,
    })
}

/// Builds every boat for a tournament from its results and declared pairings.
///
/// Paired boats come first in declaration order, then each unpaired angler as a solo
/// team in result order.
pub fn assemble_teams(
    tournament: &Tournament,
    results: &[&IndividualResult],
    pairings: &[&[Uuid]],
) -> Result<Vec<TeamResult>> {
    let by_angler: HashMap<Uuid, &IndividualResult> =
        results.iter().map(|r| (r.angler_id, *r)).collect();

    let mut seated = HashSet::new();
    let mut teams = Vec::with_capacity(results.len());

    for pairing in pairings {
        if !tournament.is_team_format && pairing.len() > 1 {
            return Err(ScoringError::InvalidTeam(format!(
                "tournament '{}' is an individual event but a boat of {} was declared",
                tournament.name,
                pairing.len()
            )));
        }

        let mut members = Vec::with_capacity(pairing.len());
        for angler_id in pairing.iter() {
            let result = by_angler.get(angler_id).ok_or_else(|| {
                ScoringError::InvalidTeam(format!(
                    "angler {} is paired but has no result in tournament '{}'",
                    angler_id, tournament.name
                ))
            })?;
            if !seated.insert(*angler_id) {
                return Err(ScoringError::InvalidTeam(format!(
                    "angler {} is seated in more than one boat",
                    angler_id
                )));
            }
            members.push(*result);
        }

        teams.push(aggregate_team(tournament, &members)?);
    }

    for result in results {
        if seated.insert(result.angler_id) {
            teams.push(aggregate_team(tournament, &[*result])?);
        }
    }

    debug!(
        "Assembled {} team(s) from {} result(s) for tournament '{}'",
        teams.len(),
        results.len(),
        tournament.name
    );

    Ok(teams)
}
