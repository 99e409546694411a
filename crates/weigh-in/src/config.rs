use anyhow::{Context, Result};
use rust_decimal::Decimal;
use scoring::services::payout::PayoutSchedule;
use scoring::{DisqualifiedPoints, ScoringPolicy};

#[derive(Debug, Clone)]
pub struct Config {
    pub disqualified_points: DisqualifiedPoints,
    pub tie_break_seed: Option<u64>,
    pub payout_schedule: PayoutSchedule,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let disqualified_points = match std::env::var("DQ_POINTS_POLICY") {
            Ok(value) => value
                .parse()
                .map_err(anyhow::Error::msg)
                .context("DQ_POINTS_POLICY is not a known policy")?,
            Err(_) => DisqualifiedPoints::default(),
        };

        let tie_break_seed = match std::env::var("TIE_BREAK_SEED") {
            Ok(value) => Some(value.parse().context("TIE_BREAK_SEED must be a number")?),
            Err(_) => None,
        };

        let payout_schedule = match std::env::var("PAYOUT_SCHEDULE") {
            Ok(value) => parse_schedule(&value)?,
            Err(_) => PayoutSchedule::default(),
        };

        Ok(Self {
            disqualified_points,
            tie_break_seed,
            payout_schedule,
        })
    }

    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::default().with_disqualified(self.disqualified_points)
    }
}

/// Comma-separated percentages per paid place, e.g. `50,30,20`.
pub fn parse_schedule(value: &str) -> Result<PayoutSchedule> {
    let percentages = value
        .split(',')
        .map(|share| {
            share
                .trim()
                .parse::<Decimal>()
                .with_context(|| format!("'{}' is not a percentage", share.trim()))
        })
        .collect::<Result<Vec<_>>>()?;

    PayoutSchedule::new(percentages).context("PAYOUT_SCHEDULE is not a valid payout schedule")
}
