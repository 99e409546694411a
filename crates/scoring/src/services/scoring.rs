use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Angler, IndividualResult, SeasonAwards, SeasonStanding, TeamResult, Tournament,
    TournamentPoints, TournamentRanking,
};
use crate::policy::ScoringPolicy;
use crate::repository::SeasonRepository;
use crate::services::award_tracking::{self, DrawBook, TournamentCatch};
use crate::services::payout::{self, PayoutSchedule, TournamentPayout};
use crate::services::points_allocation;
use crate::services::result_validator::{ResultValidator, ValidationContext, ValidationReport};
use crate::services::season_standings;
use crate::services::team_aggregation::assemble_teams;
use crate::services::tournament_ranking::TournamentRanker;
use crate::tie_break::TieBreaker;

/// A tournament whose every result passed validation, with its boats assembled.
pub struct ValidatedTournament<'a> {
    pub tournament: &'a Tournament,
    pub results: Vec<&'a IndividualResult>,
    pub teams: Vec<TeamResult>,
    pub report: ValidationReport,
}

/// Entry point for the admin and persistence side.
///
/// Every operation is a full recomputation from the snapshot: results are validated,
/// boats assembled, and only then ranked, pointed or awarded. A single invalid result
/// fails the whole operation instead of quietly dropping out of the tournament.
pub struct ScoringService<'a> {
    repo: SeasonRepository<'a>,
    policy: ScoringPolicy,
}

impl<'a> ScoringService<'a> {
    pub fn new(repo: SeasonRepository<'a>, policy: ScoringPolicy) -> Self {
        Self { repo, policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn load_tournament(&self, tournament_id: Uuid) -> Result<ValidatedTournament<'a>> {
        let tournament = self.repo.get_tournament(tournament_id)?;
        let results = self.repo.list_tournament_results(tournament_id)?;

        let mut report = ValidationReport::default();
        for result in &results {
            let context = ValidationContext {
                tournament,
                prior_guest_appearances: self
                    .repo
                    .count_prior_guest_appearances(tournament, result.angler_id),
                max_guest_appearances: self.policy.max_guest_appearances,
            };
            report.merge(ResultValidator::validate(result, &context)?);
        }

        let pairings = self.repo.list_pairings(tournament_id);
        let teams = assemble_teams(tournament, &results, &pairings)?;

        Ok(ValidatedTournament {
            tournament,
            results,
            teams,
            report,
        })
    }

    /// Validates every result of a season, returning the combined warnings.
    pub fn validate_season(&self, season_id: Uuid) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();
        for tournament in self.repo.list_season_tournaments(season_id)? {
            report.merge(self.load_tournament(tournament.tournament_id)?.report);
        }
        Ok(report)
    }

    pub fn rank_tournament(
        &self,
        tournament_id: Uuid,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Result<TournamentRanking> {
        let loaded = self.load_tournament(tournament_id)?;
        loaded.report.log_warnings();

        let ranking = TournamentRanker::new(loaded.tournament, &self.policy)
            .with_recorded_flips(self.repo.list_coin_flips(tournament_id))
            .rank(loaded.teams, tie_breaker);

        Ok(ranking)
    }

    pub fn allocate_points(&self, tournament_id: Uuid) -> Result<TournamentPoints> {
        let loaded = self.load_tournament(tournament_id)?;
        loaded.report.log_warnings();

        Ok(points_allocation::allocate_points(
            loaded.tournament,
            &loaded.results,
            &self.policy,
        ))
    }

    pub fn compute_season_standings(&self, season_id: Uuid) -> Result<Vec<SeasonStanding>> {
        let season = self.repo.get_season(season_id)?;
        let mut allocations = Vec::new();
        let mut results = Vec::new();

        for tournament in self.repo.list_season_tournaments(season_id)? {
            if !tournament.points_eligible {
                debug!("Skipping '{}': not points eligible", tournament.name);
                continue;
            }
            let loaded = self.load_tournament(tournament.tournament_id)?;
            allocations.push(points_allocation::allocate_points(
                loaded.tournament,
                &loaded.results,
                &self.policy,
            ));
            results.extend(loaded.results);
        }

        let anglers = self.anglers_of(&allocations)?;
        let standings = season_standings::compute_standings(&allocations, &results, &anglers)?;

        info!(
            "Standings for {}: {} angler(s) over {} points tournament(s)",
            season.name,
            standings.len(),
            allocations.len()
        );

        Ok(standings)
    }

    pub fn compute_awards(
        &self,
        season_id: Uuid,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Result<SeasonAwards> {
        self.repo.get_season(season_id)?;

        let catches: Vec<TournamentCatch<'_>> = self
            .repo
            .list_season_tournaments(season_id)?
            .into_iter()
            .map(|t| {
                self.load_tournament(t.tournament_id).map(|loaded| TournamentCatch {
                    tournament: loaded.tournament,
                    results: loaded.results,
                    teams: loaded.teams,
                })
            })
            .collect::<Result<_>>()?;

        Ok(award_tracking::compute_awards(
            season_id,
            &catches,
            self.repo.list_award_draws(),
            tie_breaker,
        ))
    }

    /// Purse split and Big Bass pot for one tournament. The purse defaults to the
    /// collected entry fees. Coin flips and pot draws not yet on record are returned
    /// with the payout for the caller to store.
    pub fn compute_payout(
        &self,
        tournament_id: Uuid,
        purse: Option<Decimal>,
        schedule: &PayoutSchedule,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Result<TournamentPayout> {
        let ranking = self.rank_tournament(tournament_id, tie_breaker)?;
        let loaded = self.load_tournament(tournament_id)?;

        let purse = purse.unwrap_or_else(|| payout::tournament_purse(loaded.tournament, &loaded.results));
        let payouts = payout::distribute_purse(&ranking.placings, purse, schedule)?;
        let pot = payout::big_bass_pot_total(loaded.tournament, &loaded.results);
        let mut draws = DrawBook::new(self.repo.list_award_draws());
        let big_bass = payout::tournament_big_bass(
            loaded.tournament,
            &loaded.teams,
            pot,
            &mut draws,
            tie_breaker,
        );

        Ok(TournamentPayout {
            tournament_id,
            purse,
            payouts,
            big_bass,
            new_coin_flips: ranking.new_coin_flips,
            new_draws: draws.into_new_draws(),
        })
    }

    fn anglers_of(&self, allocations: &[TournamentPoints]) -> Result<Vec<&'a Angler>> {
        let mut ids: Vec<Uuid> = allocations
            .iter()
            .flat_map(|a| a.entries.iter().map(|e| e.angler_id))
            .collect();
        ids.sort();
        ids.dedup();

        ids.into_iter().map(|id| self.repo.get_angler(id)).collect()
    }
}
