//! Async driver for one encounter.
//!
//! [`EncounterRunner`] owns the engine and the dice and is the only caller of
//! `advance`/`submit`. Provider futures are the single suspension point; they
//! receive a detached snapshot, so nothing they do can reach the live state.
//!
//! Events leave the runner two ways. The [`EventBus`] broadcast is lossy: a
//! slow subscriber skips ahead. A [`feed`](EncounterRunner::feed) is lossless:
//! the runner waits for room before continuing, so a reader that drains it
//! sees the whole log in order.

use serde::Serialize;
use tokio::sync::{broadcast, mpsc};

use game_core::{
    CombatEngine, CombatantId, Dice, EncounterBuilder, EndReason, Event, EventLog, Side, Step,
};

use crate::api::{ActionRequest, ProviderRegistry, Result};
use crate::events::{EventBus, Topic};

/// Final result of a completed encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EncounterResult {
    /// `None` for mutual defeat or the round limit.
    pub winner: Option<Side>,
    pub reason: EndReason,
    pub rounds: u32,
    /// The complete log, ending with `EncounterEnded`.
    pub events: Vec<Event>,
}

pub struct EncounterRunner {
    engine: CombatEngine,
    dice: Dice,
    providers: ProviderRegistry,
    bus: EventBus,
    feeds: Vec<mpsc::Sender<Event>>,
    /// Log entries before this index have been published.
    published: usize,
}

impl EncounterRunner {
    pub fn new(engine: CombatEngine, dice: Dice, providers: ProviderRegistry) -> Self {
        Self {
            engine,
            dice,
            providers,
            bus: EventBus::new(),
            feeds: Vec::new(),
            published: 0,
        }
    }

    /// Builds the engine from `builder` with fresh `dice`.
    pub fn from_builder(
        builder: &EncounterBuilder,
        dice: Dice,
        providers: ProviderRegistry,
    ) -> Result<Self> {
        let engine = builder.build(&dice)?;
        Ok(Self::new(engine, dice, providers))
    }

    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    /// Subscribe before calling [`run`](Self::run) to see every event.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    pub fn subscribe_topic(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe_topic(topic)
    }

    /// Opens a lossless event feed holding up to `capacity` undelivered events.
    ///
    /// The runner blocks while the feed is full, so the reader must keep
    /// draining it. Dropping the receiver detaches the feed.
    pub fn feed(&mut self, capacity: usize) -> mpsc::Receiver<Event> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        self.feeds.push(tx);
        rx
    }

    pub fn engine(&self) -> &CombatEngine {
        &self.engine
    }

    /// Everything emitted so far, including after a failed run.
    pub fn log(&self) -> &EventLog {
        self.engine.log()
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    /// Drives the encounter to its end.
    ///
    /// # Errors
    ///
    /// Stops at the first provider or engine error. Events emitted up to that
    /// point stay in the log and have been published; a rejected action
    /// leaves no trace.
    pub async fn run(&mut self) -> Result<EncounterResult> {
        tracing::info!(
            target: "runtime::encounter",
            seed = self.dice.seed(),
            combatants = self.engine.state().combatants().len(),
            max_rounds = self.engine.config().max_rounds,
            "encounter starting"
        );

        loop {
            let step = self.engine.advance(&mut self.dice);
            self.flush().await;

            match step? {
                Step::Finished(outcome) => {
                    tracing::info!(
                        target: "runtime::encounter",
                        winner = ?outcome.winner,
                        reason = %outcome.reason,
                        rounds = outcome.rounds,
                        events = self.engine.log().len(),
                        "encounter ended"
                    );
                    return Ok(EncounterResult {
                        winner: outcome.winner,
                        reason: outcome.reason,
                        rounds: outcome.rounds,
                        events: self.engine.log().read_all().cloned().collect(),
                    });
                }
                Step::AwaitingAction { actor } => self.take_turn(actor).await?,
            }
        }
    }

    async fn take_turn(&mut self, actor: CombatantId) -> Result<()> {
        let request = ActionRequest::new(
            actor,
            self.engine.state().clone(),
            self.engine.legal_actions(),
        );
        let kind = self.providers.kind_for(actor);
        let provider = self.providers.get_for(actor)?;

        tracing::debug!(
            target: "runtime::encounter",
            actor = %actor,
            round = self.engine.state().round(),
            provider = %kind,
            legal = request.legal.len(),
            "awaiting action"
        );

        let action = match provider.provide_action(&request, &mut self.dice).await {
            Ok(action) => action,
            Err(err) => {
                tracing::warn!(
                    target: "runtime::encounter",
                    actor = %actor,
                    error = %err,
                    "no action provided"
                );
                return Err(err);
            }
        };

        let submitted = self.engine.submit(action.clone(), &mut self.dice);
        self.flush().await;
        if let Err(err) = &submitted {
            tracing::warn!(
                target: "runtime::encounter",
                actor = %actor,
                action = %action,
                error = %err,
                "action rejected"
            );
        }
        submitted?;
        Ok(())
    }

    async fn flush(&mut self) {
        let log = self.engine.log();
        for event in log.read_from(self.published) {
            tracing::trace!(
                target: "runtime::encounter",
                seq = event.seq.0,
                kind = event.kind.as_ref(),
                "event"
            );
            self.bus.publish(event);
            for feed in &self.feeds {
                // A closed feed is pruned below.
                let _ = feed.send(event.clone()).await;
            }
        }
        self.published = log.len();
        self.feeds.retain(|feed| !feed.is_closed());
    }
}
