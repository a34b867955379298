//! Topic-based broadcast of encounter events.

use tokio::sync::broadcast;

use game_core::{Event, EventKind};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Encounter start, initiative, turn order and the final result.
    Lifecycle,
    /// Round and turn boundaries.
    Turn,
    /// Attacks, damage, healing, conditions and defeats.
    Combat,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Lifecycle, Topic::Turn, Topic::Combat];

    pub fn of(kind: &EventKind) -> Topic {
        match kind {
            EventKind::EncounterStarted { .. }
            | EventKind::InitiativeRolled { .. }
            | EventKind::TurnOrderSet { .. }
            | EventKind::EncounterEnded { .. } => Topic::Lifecycle,
            EventKind::RoundStarted { .. }
            | EventKind::TurnStarted { .. }
            | EventKind::TurnSkipped { .. } => Topic::Turn,
            EventKind::ConditionApplied { .. }
            | EventKind::ConditionRemoved { .. }
            | EventKind::AttackRolled { .. }
            | EventKind::DamageDealt { .. }
            | EventKind::Healed { .. }
            | EventKind::Passed { .. }
            | EventKind::CombatantDefeated { .. } => Topic::Combat,
        }
    }

    const fn index(self) -> usize {
        match self {
            Topic::Lifecycle => 0,
            Topic::Turn => 1,
            Topic::Combat => 2,
        }
    }
}

/// Fan-out of log events to async subscribers.
///
/// Publishing is best-effort: with no subscribers (or a lagging one) events
/// are dropped from the channel, never from the engine's log. Subscribers
/// that need every event should fall back to the log itself.
#[derive(Clone, Debug)]
pub struct EventBus {
    all: broadcast::Sender<Event>,
    topics: [broadcast::Sender<Event>; 3],
}

impl EventBus {
    /// Creates a new event bus with default capacity for each channel
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            all: broadcast::channel(capacity).0,
            topics: Topic::ALL.map(|_| broadcast::channel(capacity).0),
        }
    }

    pub fn publish(&self, event: &Event) {
        let topic = Topic::of(&event.kind);
        if self.topics[topic.index()].send(event.clone()).is_err() {
            tracing::trace!(target: "runtime::events", ?topic, "no topic subscribers");
        }
        if self.all.send(event.clone()).is_err() {
            tracing::trace!(target: "runtime::events", seq = event.seq.0, "no subscribers");
        }
    }

    /// Every event, in log order.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.all.subscribe()
    }

    /// Events of one topic only, in log order.
    pub fn subscribe_topic(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.topics[topic.index()].subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
