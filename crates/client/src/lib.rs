//! Composition root for the `skirmish` binary.
//!
//! ```text
//! Settings ──> Scenario ──> EncounterRunner ──events──> CliFrontend (stdout)
//!                              ▲                            │
//!                              └── HumanProvider <─prompts──┘ (stdin)
//! ```
//!
//! The runner owns the engine and drives it on the main task; the frontend
//! runs as a separate task and only sees published events and prompts.

pub mod args;
pub mod report;
pub mod settings;

pub use args::Args;
pub use report::Report;
pub use settings::Settings;

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::BufReader;

use client_frontend_cli::{CliConfig, CliFrontend};
use game_core::{Dice, EncounterOutcome};
use runtime::{
    EncounterRunner, EventBus, HumanProvider, PlannerProvider, ProviderKind, ProviderRegistry,
    ScriptedProvider,
};

/// How a run ended, for the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Finished(EncounterOutcome),
    /// Input ended while the hero owed an action.
    Cancelled,
}

/// Assembles and plays one encounter.
pub async fn run(settings: Settings, cli: CliConfig, json: Option<&Path>) -> Result<RunStatus> {
    let mut providers = ProviderRegistry::new();
    providers.register(ProviderKind::Scripted, ScriptedProvider::new(settings.tie_break));
    providers.register(ProviderKind::Planner, PlannerProvider::default());

    let prompts = if settings.interactive {
        let (human, prompts) = HumanProvider::channel(settings.runtime.choice_buffer_size);
        providers.register(ProviderKind::Human, human);
        Some(prompts)
    } else {
        None
    };

    let builder = settings.scenario.assemble(
        &settings.catalog,
        settings.runtime.game_config.clone(),
        &mut providers,
    )?;
    let dice = Dice::seeded(settings.seed);
    let mut runner = EncounterRunner::from_builder(&builder, dice, providers)?
        .with_bus(EventBus::with_capacity(settings.runtime.event_buffer_size));

    let events = runner.feed(settings.runtime.event_buffer_size);
    let frontend = tokio::spawn(async move {
        let mut frontend = CliFrontend::stdout(cli);
        frontend
            .run(events, prompts, BufReader::new(tokio::io::stdin()))
            .await
    });

    let result = runner.run().await;
    let outcome = runner.engine().outcome().copied();

    if let Some(path) = json {
        let mut report = Report::new(settings.seed, &settings.scenario, runner.log(), outcome)?;
        if let Err(err) = &result {
            report = report.with_error(err);
        }
        report.write(path)?;
        tracing::info!(path = %path.display(), "event log written");
    }

    let digest = runner.log().digest().context("hashing the event log")?;
    tracing::info!(
        seed = settings.seed,
        digest = %hex::encode(digest),
        events = runner.log().len(),
        "encounter log"
    );

    // Closing the runner closes the event and prompt channels, which lets the
    // frontend drain and exit.
    drop(runner);
    frontend.await??;

    match result {
        Ok(result) => Ok(RunStatus::Finished(EncounterOutcome {
            winner: result.winner,
            reason: result.reason,
            rounds: result.rounds,
        })),
        Err(err) if err.is_cancelled() => {
            tracing::warn!(error = %err, "encounter abandoned");
            Ok(RunStatus::Cancelled)
        }
        Err(err) => Err(err.into()),
    }
}
