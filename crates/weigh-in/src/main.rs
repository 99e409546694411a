mod config;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use scoring::{
    RandomTieBreaker, ScoringService, SeasonRepository, SeasonSnapshot, TieBreaker,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "weigh-in")]
#[command(about = "Tournament scoring and season standings for the bass club", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "SEASON_FILE", default_value = "./season.json")]
    season_file: PathBuf,

    /// Season to work on; required only when the file holds more than one
    #[arg(long, env = "SEASON_ID")]
    season: Option<Uuid>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every result in the season file
    Validate,
    Rank {
        #[arg(long)]
        tournament: Uuid,

        #[arg(long)]
        seed: Option<u64>,

        /// Write new coin flips back to the season file
        #[arg(long)]
        record: bool,
    },
    Points {
        #[arg(long)]
        tournament: Uuid,
    },
    Standings,
    Awards {
        #[arg(long)]
        seed: Option<u64>,

        /// Write new award draws back to the season file
        #[arg(long)]
        record: bool,
    },
    Payout {
        #[arg(long)]
        tournament: Uuid,

        /// Defaults to the entry fees collected
        #[arg(long)]
        purse: Option<Decimal>,

        #[arg(long)]
        seed: Option<u64>,

        /// Write new coin flips and pot draws back to the season file
        #[arg(long)]
        record: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("weigh_in={},scoring={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let mut snapshot = load_snapshot(&cli.season_file).await?;
    let season_id = resolve_season(&snapshot, cli.season)?;

    match cli.command {
        Commands::Validate => {
            let scoring = service(&snapshot, &config);
            let report = scoring.validate_season(season_id)?;
            report.log_warnings();
            tracing::info!(
                "✓ All results valid ({} warning(s))",
                report.warnings.len()
            );
        }
        Commands::Rank {
            tournament,
            seed,
            record,
        } => {
            let ranking = {
                let scoring = service(&snapshot, &config);
                scoring.rank_tournament(tournament, tie_breaker(seed, &config).as_mut())?
            };
            print_json(&ranking)?;

            if record {
                snapshot.record_coin_flips(tournament, ranking.new_coin_flips);
                save_snapshot(&cli.season_file, &snapshot).await?;
            }
        }
        Commands::Points { tournament } => {
            let points = service(&snapshot, &config).allocate_points(tournament)?;
            print_json(&points)?;
        }
        Commands::Standings => {
            let standings = service(&snapshot, &config).compute_season_standings(season_id)?;
            print_json(&standings)?;
        }
        Commands::Awards { seed, record } => {
            let awards = service(&snapshot, &config)
                .compute_awards(season_id, tie_breaker(seed, &config).as_mut())?;
            print_json(&awards)?;

            if record {
                snapshot.record_award_draws(awards.new_draws);
                save_snapshot(&cli.season_file, &snapshot).await?;
            }
        }
        Commands::Payout {
            tournament,
            purse,
            seed,
            record,
        } => {
            let payout = service(&snapshot, &config).compute_payout(
                tournament,
                purse,
                &config.payout_schedule,
                tie_breaker(seed, &config).as_mut(),
            )?;
            print_json(&payout)?;

            if record {
                snapshot.record_coin_flips(tournament, payout.new_coin_flips);
                snapshot.record_award_draws(payout.new_draws);
                save_snapshot(&cli.season_file, &snapshot).await?;
            }
        }
    }

    Ok(())
}

fn service<'a>(snapshot: &'a SeasonSnapshot, config: &Config) -> ScoringService<'a> {
    ScoringService::new(SeasonRepository::new(snapshot), config.policy())
}

fn tie_breaker(seed: Option<u64>, config: &Config) -> Box<dyn TieBreaker> {
    match seed.or(config.tie_break_seed) {
        Some(seed) => {
            tracing::debug!("Coin flips seeded with {}", seed);
            Box::new(RandomTieBreaker::seeded(seed))
        }
        None => Box::new(RandomTieBreaker::from_entropy()),
    }
}

async fn load_snapshot(path: &Path) -> Result<SeasonSnapshot> {
    tracing::debug!("Loading season file: {}", path.display());

    let json_content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read season file {}", path.display()))?;
    let snapshot: SeasonSnapshot = serde_json::from_str(&json_content)
        .with_context(|| format!("{} is not a valid season file", path.display()))?;

    tracing::debug!(
        "Loaded {} tournament(s), {} angler(s), {} result(s)",
        snapshot.tournaments.len(),
        snapshot.anglers.len(),
        snapshot.results.len()
    );

    Ok(snapshot)
}

async fn save_snapshot(path: &Path, snapshot: &SeasonSnapshot) -> Result<()> {
    tracing::info!("Recording draws to {}", path.display());

    let json_content = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(path, json_content)
        .await
        .with_context(|| format!("Cannot write season file {}", path.display()))
}

fn resolve_season(snapshot: &SeasonSnapshot, requested: Option<Uuid>) -> Result<Uuid> {
    if let Some(season_id) = requested {
        return Ok(season_id);
    }

    match snapshot.seasons.as_slice() {
        [season] => Ok(season.season_id),
        [] => bail!("Season file contains no season"),
        seasons => bail!(
            "Season file contains {} seasons; pick one with --season",
            seasons.len()
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
