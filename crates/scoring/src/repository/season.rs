use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::models::{Angler, AwardDraw, CoinFlipRecord, IndividualResult, Season, Tournament};

/// Boats declared for a tournament; anglers left out fish solo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPairing {
    pub tournament_id: Uuid,
    pub members: Vec<Uuid>,
}

/// Coin flips already made for a tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedCoinFlips {
    pub tournament_id: Uuid,
    pub flips: Vec<CoinFlipRecord>,
}

/// Everything the engine needs for one season, as handed over by the results-entry side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonSnapshot {
    pub seasons: Vec<Season>,
    pub anglers: Vec<Angler>,
    pub tournaments: Vec<Tournament>,
    pub results: Vec<IndividualResult>,
    #[serde(default)]
    pub pairings: Vec<TeamPairing>,
    #[serde(default)]
    pub coin_flips: Vec<RecordedCoinFlips>,
    /// Draws already made for Big Bass and Heavy Stringer ties
    #[serde(default)]
    pub award_draws: Vec<AwardDraw>,
}

impl SeasonSnapshot {
    /// Stores newly made coin flips so the next ranking replays them.
    pub fn record_coin_flips(&mut self, tournament_id: Uuid, flips: Vec<CoinFlipRecord>) {
        if flips.is_empty() {
            return;
        }
        match self
            .coin_flips
            .iter_mut()
            .find(|r| r.tournament_id == tournament_id)
        {
            Some(recorded) => recorded.flips.extend(flips),
            None => self.coin_flips.push(RecordedCoinFlips {
                tournament_id,
                flips,
            }),
        }
    }

    /// Stores newly made award draws so later award and payout runs replay them.
    pub fn record_award_draws(&mut self, draws: Vec<AwardDraw>) {
        for draw in draws {
            let already = self
                .award_draws
                .iter()
                .any(|d| d.matches(draw.award, &draw.contenders));
            if !already {
                self.award_draws.push(draw);
            }
        }
    }
}

pub struct SeasonRepository<'a> {
    snapshot: &'a SeasonSnapshot,
}

impl<'a> SeasonRepository<'a> {
    pub fn new(snapshot: &'a SeasonSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn get_season(&self, season_id: Uuid) -> Result<&'a Season> {
        self.snapshot
            .seasons
            .iter()
            .find(|s| s.season_id == season_id)
            .ok_or(ScoringError::SeasonNotFound(season_id))
    }

    pub fn get_tournament(&self, tournament_id: Uuid) -> Result<&'a Tournament> {
        self.snapshot
            .tournaments
            .iter()
            .find(|t| t.tournament_id == tournament_id)
            .ok_or(ScoringError::TournamentNotFound(tournament_id))
    }

    pub fn get_angler(&self, angler_id: Uuid) -> Result<&'a Angler> {
        self.snapshot
            .anglers
            .iter()
            .find(|a| a.angler_id == angler_id)
            .ok_or(ScoringError::AnglerNotFound(angler_id))
    }

    /// Tournaments of a season in date order, ties kept in snapshot order.
    pub fn list_season_tournaments(&self, season_id: Uuid) -> Result<Vec<&'a Tournament>> {
        self.get_season(season_id)?;

        let mut tournaments: Vec<&Tournament> = self
            .snapshot
            .tournaments
            .iter()
            .filter(|t| t.season_id == season_id)
            .collect();
        tournaments.sort_by_key(|t| t.date);

        Ok(tournaments)
    }

    /// Results entered for a tournament. More than one row for the same angler is
    /// a broken precondition of the entry side and is reported, never merged.
    pub fn list_tournament_results(&self, tournament_id: Uuid) -> Result<Vec<&'a IndividualResult>> {
        self.get_tournament(tournament_id)?;

        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for result in self
            .snapshot
            .results
            .iter()
            .filter(|r| r.tournament_id == tournament_id)
        {
            if !seen.insert(result.angler_id) {
                return Err(ScoringError::DuplicateResult {
                    tournament_id,
                    angler_id: result.angler_id,
                });
            }
            results.push(result);
        }

        Ok(results)
    }

    pub fn list_pairings(&self, tournament_id: Uuid) -> Vec<&'a [Uuid]> {
        self.snapshot
            .pairings
            .iter()
            .filter(|p| p.tournament_id == tournament_id)
            .map(|p| p.members.as_slice())
            .collect()
    }

    pub fn list_coin_flips(&self, tournament_id: Uuid) -> &'a [CoinFlipRecord] {
        self.snapshot
            .coin_flips
            .iter()
            .find(|r| r.tournament_id == tournament_id)
            .map(|r| r.flips.as_slice())
            .unwrap_or(&[])
    }

    pub fn list_award_draws(&self) -> &'a [AwardDraw] {
        &self.snapshot.award_draws
    }

    /// Non-member appearances by an angler in the same season, in tournaments that
    /// come earlier in season order. Tournaments sharing a date are ordered as they
    /// appear in the snapshot.
    pub fn count_prior_guest_appearances(&self, tournament: &Tournament, angler_id: Uuid) -> u32 {
        let season: Vec<&Tournament> = self
            .snapshot
            .tournaments
            .iter()
            .filter(|t| t.season_id == tournament.season_id)
            .collect();
        let position = |id: Uuid| season.iter().position(|t| t.tournament_id == id);
        let Some(current) = position(tournament.tournament_id) else {
            return 0;
        };
        let current_key = (tournament.date, current);

        let earlier: HashSet<Uuid> = season
            .iter()
            .enumerate()
            .filter(|(idx, t)| (t.date, *idx) < current_key)
            .map(|(_, t)| t.tournament_id)
            .collect();

        self.snapshot
            .results
            .iter()
            .filter(|r| {
                r.angler_id == angler_id
                    && !r.was_member_at_time
                    && earlier.contains(&r.tournament_id)
            })
            .count() as u32
    }
}
