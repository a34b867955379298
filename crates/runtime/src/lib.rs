//! Runtime orchestration for turn-based encounters.
//!
//! This crate wires the action provider abstraction, the encounter runner and
//! the event bus around the synchronous `game-core` state machine. Consumers
//! assemble a [`Scenario`], register providers in a [`ProviderRegistry`] and
//! drive the encounter with [`EncounterRunner::run`].
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] holds the human, scripted and planner actor policies
//! - [`events`] fans log entries out to async subscribers
//! - [`encounter`] hosts the runner
//! - [`scenario`] and [`config`] describe what to run and how
pub mod api;
pub mod config;
pub mod encounter;
pub mod events;
pub mod providers;
pub mod scenario;

pub use api::{
    ActionProvider, ActionRequest, PassActionProvider, ProviderKind, ProviderRegistry, Result,
    RuntimeError,
};
pub use config::{RuntimeConfig, read_env};
pub use encounter::{EncounterResult, EncounterRunner};
pub use events::{EventBus, Topic};
pub use providers::{
    ChoiceRejection, ChoiceRequest, HumanProvider, PlannerConfig, PlannerProvider,
    ScriptedProvider, TieBreak, parse_choice,
};
pub use scenario::{Placement, Scenario};
