use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{ValidationError, Violation};
use crate::models::{IndividualResult, Tournament};

/// Season-to-date facts a single result is checked against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub tournament: &'a Tournament,
    pub prior_guest_appearances: u32,
    pub max_guest_appearances: u32,
}

pub struct ResultValidator;

impl ResultValidator {
    /// Checks one submission before anything downstream sees it.
    ///
    /// Every broken rule is collected into the error; nothing is clamped or coerced.
    /// On success the non-fatal observations come back in the report.
    pub fn validate(
        result: &IndividualResult,
        context: &ValidationContext<'_>,
    ) -> Result<ValidationReport, ValidationError> {
        let tournament = context.tournament;
        let mut violations = Vec::new();
        let mut report = ValidationReport::default();

        if result.tournament_id != tournament.tournament_id {
            violations.push(Violation::WrongTournament(result.tournament_id));
        }

        if result.num_fish_caught > tournament.fish_limit {
            violations.push(Violation::FishOverLimit {
                caught: result.num_fish_caught,
                limit: tournament.fish_limit,
            });
        }

        if result.gross_weight < Decimal::ZERO {
            violations.push(Violation::NegativeGrossWeight(result.gross_weight));
        }

        if result.big_bass_weight < Decimal::ZERO {
            violations.push(Violation::NegativeBigBassWeight(result.big_bass_weight));
        }

        if result.big_bass_weight > result.gross_weight {
            violations.push(Violation::BigBassExceedsGross {
                big_bass: result.big_bass_weight,
                gross: result.gross_weight,
            });
        }

        if result.buy_in
            && (result.num_fish_caught != 0
                || !result.gross_weight.is_zero()
                || result.dead_fish_count != 0)
        {
            violations.push(Violation::BuyInWithCatch {
                fish: result.num_fish_caught,
                weight: result.gross_weight,
                dead: result.dead_fish_count,
            });
        }

        if result.dead_fish_count > result.num_fish_caught && !result.buy_in {
            violations.push(Violation::DeadFishExceedCatch {
                dead: result.dead_fish_count,
                caught: result.num_fish_caught,
            });
        }

        if result.num_fish_caught == 0 && result.gross_weight > Decimal::ZERO && !result.buy_in {
            violations.push(Violation::WeightWithoutFish(result.gross_weight));
        }

        if !result.was_member_at_time
            && context.prior_guest_appearances >= context.max_guest_appearances
        {
            violations.push(Violation::GuestLimitExceeded {
                prior: context.prior_guest_appearances,
            });
        }

        if !violations.is_empty() {
            return Err(ValidationError {
                tournament_id: result.tournament_id,
                angler_id: result.angler_id,
                violations,
            });
        }

        if tournament.lake.is_none() {
            report.warnings.push(format!(
                "Tournament '{}' has no lake assigned yet",
                tournament.name
            ));
        }

        if result.num_fish_caught > 0 && result.big_bass_weight.is_zero() && !result.disqualified {
            report.warnings.push(format!(
                "Angler {} weighed {} fish but no big bass was recorded",
                result.angler_id, result.num_fish_caught
            ));
        }

        if result.disqualified && result.num_fish_caught > 0 {
            report.warnings.push(format!(
                "Angler {} is disqualified; {} lb retained for audit only",
                result.angler_id, result.gross_weight
            ));
        }

        Ok(report)
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn merge(&mut self, other: ValidationReport) {
        self.warnings.extend(other.warnings);
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
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
        let mut tournament = Tournament::new(
            Uuid::new_v4(),
            "April Open",
            NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
        );
        tournament.lake = Some("Lake Travis".to_string());
        tournament
    }

    fn context(tournament: &Tournament) -> ValidationContext<'_> {
        ValidationContext {
            tournament,
            prior_guest_appearances: 0,
            max_guest_appearances: 2,
        }
    }

    fn violations_of(result: &IndividualResult, context: &ValidationContext<'_>) -> Vec<Violation> {
        ResultValidator::validate(result, context)
            .unwrap_err()
            .violations
    }

    #[test]
    fn test_valid_result_passes_without_warnings() {
        let t = tournament();
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_catch(5, lb("14.25"), lb("4.10"));

        let report = ResultValidator::validate(&result, &context(&t)).unwrap();
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_fish_over_limit() {
        let t = tournament();
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_catch(6, lb("15"), lb("3"));

        assert_eq!(
            violations_of(&result, &context(&t)),
            vec![Violation::FishOverLimit { caught: 6, limit: 5 }]
        );
    }

    #[test]
    fn test_negative_weight_is_rejected_not_clamped() {
        let t = tournament();
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_catch(1, lb("-1.5"), lb("-2"));

        let violations = violations_of(&result, &context(&t));
        assert!(violations.contains(&Violation::NegativeGrossWeight(lb("-1.5"))));
        assert!(violations.contains(&Violation::NegativeBigBassWeight(lb("-2"))));
    }

    #[test]
    fn test_big_bass_heavier_than_gross() {
        let t = tournament();
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_catch(2, lb("4"), lb("4.5"));

        assert_eq!(
            violations_of(&result, &context(&t)),
            vec![Violation::BigBassExceedsGross {
                big_bass: lb("4.5"),
                gross: lb("4")
            }]
        );
    }

    #[test]
    fn test_buy_in_with_catch() {
        let t = tournament();
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_catch(1, lb("2"), lb("2"))
            .with_buy_in();

        let violations = violations_of(&result, &context(&t));
        assert_eq!(
            violations,
            vec![Violation::BuyInWithCatch {
                fish: 1,
                weight: lb("2"),
                dead: 0
            }]
        );
    }

    #[test]
    fn test_buy_in_with_dead_fish() {
        let t = tournament();
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_dead_fish(1)
            .with_buy_in();

        assert!(matches!(
            violations_of(&result, &context(&t))[..],
            [Violation::BuyInWithCatch { dead: 1, .. }]
        ));
    }

    #[test]
    fn test_dead_fish_and_weightless_catch() {
        let t = tournament();
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_catch(0, lb("3"), lb("0"))
            .with_dead_fish(1);

        let violations = violations_of(&result, &context(&t));
        assert!(violations.contains(&Violation::DeadFishExceedCatch { dead: 1, caught: 0 }));
        assert!(violations.contains(&Violation::WeightWithoutFish(lb("3"))));
    }

    #[test]
    fn test_guest_third_tournament_requires_membership() {
        let t = tournament();
        let guest = IndividualResult::new(t.tournament_id, Uuid::new_v4(), false);
        let mut ctx = context(&t);

        ctx.prior_guest_appearances = 1;
        assert!(ResultValidator::validate(&guest, &ctx).is_ok());

        ctx.prior_guest_appearances = 2;
        assert_eq!(
            violations_of(&guest, &ctx),
            vec![Violation::GuestLimitExceeded { prior: 2 }]
        );

        let member = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true);
        assert!(ResultValidator::validate(&member, &ctx).is_ok());
    }

    #[test]
    fn test_wrong_tournament() {
        let t = tournament();
        let other = Uuid::new_v4();
        let result = IndividualResult::new(other, Uuid::new_v4(), true);

        assert_eq!(
            violations_of(&result, &context(&t)),
            vec![Violation::WrongTournament(other)]
        );
    }

    #[test]
    fn test_all_violations_reported_together() {
        let t = tournament();
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), false)
            .with_catch(7, lb("-1"), lb("0"));
        let mut ctx = context(&t);
        ctx.prior_guest_appearances = 3;

        let err = ResultValidator::validate(&result, &ctx).unwrap_err();
        assert_eq!(err.violations.len(), 4);
        assert!(err.violations.contains(&Violation::GuestLimitExceeded { prior: 3 }));
    }

    #[test]
    fn test_warnings() {
        let mut t = tournament();
        t.lake = None;
        let result = IndividualResult::new(t.tournament_id, Uuid::new_v4(), true)
            .with_catch(3, lb("6"), lb("0"))
            .with_disqualification();

        let report = ResultValidator::validate(&result, &context(&t)).unwrap();
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("no lake"));
        assert!(report.warnings[1].contains("retained for audit"));
    }
}
