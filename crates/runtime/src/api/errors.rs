//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine failures, provider lookups and human input cancellation so
//! clients can bubble them up with consistent context.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use game_core::{CombatantId, EngineError, SetupError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("choice input was cancelled before {actor} could act")]
    InputCancelled { actor: CombatantId },

    #[error("no legal actions offered to {actor}")]
    NoLegalActions { actor: CombatantId },
}

impl RuntimeError {
    /// True when the encounter stopped because nobody is left to answer a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RuntimeError::InputCancelled { .. })
    }
}

/// How a combatant's actions are sourced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Prompted through a [`crate::HumanProvider`].
    Human,
    /// Decided by a [`crate::ScriptedProvider`].
    Scripted,
    /// Decided by a [`crate::PlannerProvider`].
    Planner,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Human => "human",
            ProviderKind::Scripted => "scripted",
            ProviderKind::Planner => "planner",
        };
        write!(f, "{}", label)
    }
}
