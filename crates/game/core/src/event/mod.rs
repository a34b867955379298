//! Event records: the durable account of everything that happened.
//!
//! Events reference combatants by id only. The log stays meaningful after the
//! battle state is dropped, and every rolled value needed to audit or replay
//! an outcome is carried in the event itself.
mod log;

pub use log::{EventLog, Events};

use core::fmt;

use crate::env::RollMode;
use crate::state::{Combatant, CombatantId, Condition, Side};

/// Position of an event in the log. Strictly increasing from zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable fact.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub seq: EventId,
    /// Round in progress when the event was emitted (0 during setup).
    pub round: u32,
    pub kind: EventKind,
}

/// Why an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EndReason {
    /// One side has no living members left.
    SideEliminated,
    /// Nobody is left standing.
    MutualDefeat,
    /// The round limit was reached.
    RoundLimit,
}

/// Snapshot of a combatant as the encounter starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSummary {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub armor_class: i32,
}

impl From<&Combatant> for CombatantSummary {
    fn from(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name.clone(),
            side: combatant.side,
            hp: combatant.hp(),
            max_hp: combatant.max_hp(),
            armor_class: combatant.armor_class(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    EncounterStarted {
        seed: u64,
        combatants: Vec<CombatantSummary>,
    },
    InitiativeRolled {
        combatant: CombatantId,
        roll: u32,
        modifier: i32,
        total: i32,
    },
    /// Turn order for the whole encounter.
    TurnOrderSet {
        order: Vec<CombatantId>,
    },
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        combatant: CombatantId,
    },
    /// The combatant's slot came up but it is defeated.
    TurnSkipped {
        combatant: CombatantId,
    },
    ConditionApplied {
        combatant: CombatantId,
        condition: Condition,
    },
    ConditionRemoved {
        combatant: CombatantId,
        condition: Condition,
    },
    AttackRolled {
        attacker: CombatantId,
        target: CombatantId,
        attack: String,
        rolls: Vec<u32>,
        natural: u32,
        bonus: i32,
        total: i32,
        armor_class: i32,
        mode: RollMode,
        hit: bool,
        critical: bool,
    },
    DamageDealt {
        attacker: CombatantId,
        target: CombatantId,
        rolls: Vec<u32>,
        modifier: i32,
        amount: u32,
        damage_type: String,
        hp_before: u32,
        hp_after: u32,
        max_hp: u32,
    },
    Healed {
        combatant: CombatantId,
        rolls: Vec<u32>,
        modifier: i32,
        amount: u32,
        hp_before: u32,
        hp_after: u32,
        max_hp: u32,
        charges_left: u32,
    },
    Passed {
        combatant: CombatantId,
    },
    CombatantDefeated {
        combatant: CombatantId,
        by: Option<CombatantId>,
    },
    /// Always the final event.
    EncounterEnded {
        winner: Option<Side>,
        reason: EndReason,
        rounds: u32,
    },
}

impl EventKind {
    /// Whether this event closes the encounter.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::EncounterEnded { .. })
    }
}
