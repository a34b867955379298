//! `skirmish`: a turn-based tactical combat encounter in the terminal.
//!
//! ```bash
//! # Hero against two goblins, interactive
//! cargo run -p skirmish-client -- --seed 42
//!
//! # Fully scripted replay with a JSON log
//! cargo run -p skirmish-client -- --seed 42 --auto --monster orc --json fight.json
//! ```
//!
//! Exit status: 0 when the players win, 3 when they lose or nobody wins,
//! 2 when input ended mid-fight, 1 on errors.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use client_frontend_cli::{CliConfig, logging};
use game_core::Side;
use skirmish_client::{Args, RunStatus, Settings};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    logging::setup_logging()?;

    let settings = Settings::resolve(&args, Settings::base()?.overlay_env())?;
    tracing::info!(
        seed = settings.seed,
        hero = %args.hero,
        monsters = ?args.monsters(),
        max_rounds = settings.runtime.game_config.max_rounds,
        interactive = settings.interactive,
        planner = args.planner,
        "starting skirmish"
    );

    let status =
        skirmish_client::run(settings, CliConfig::from_env(), args.json.as_deref()).await?;

    Ok(match status {
        RunStatus::Finished(outcome) if outcome.winner == Some(Side::Players) => ExitCode::SUCCESS,
        RunStatus::Finished(_) => ExitCode::from(3),
        RunStatus::Cancelled => ExitCode::from(2),
    })
}
