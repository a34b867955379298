//! Deterministic combat rules and data types shared across clients.
//!
//! `game-core` defines the canonical encounter rules (combatants, actions,
//! initiative, resolution) and exposes pure APIs that can be reused by both the
//! runtime and offline tools. All state mutation flows through
//! [`engine::CombatEngine`], and every change it makes is recorded in the
//! append-only [`event::EventLog`].
//!
//! The crate performs no I/O and reads no ambient randomness: every die is drawn
//! from the [`env::Dice`] stream handed in by the caller.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;

pub use action::{Action, ActionError, ActionKind, legal_actions};
pub use combat::{AttackOutcome, AttackRoll, DamageRoll, HealOutcome, Outcome};
pub use config::GameConfig;
pub use engine::{
    CombatEngine, EncounterBuilder, EncounterOutcome, EngineError, InitiativeRoll, SetupError,
    SpawnOptions, Step,
};
pub use env::{
    AbilityScores, AttackProfile, CreatureOracle, CreatureStats, D20Roll, Dice, DiceError,
    DiceExpr, RollMode, RollResult, ability_mod,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use event::{CombatantSummary, EndReason, Event, EventId, EventKind, EventLog};
pub use state::{
    BattleState, Combatant, CombatantId, Condition, Conditions, Phase, Side, TurnState,
};
