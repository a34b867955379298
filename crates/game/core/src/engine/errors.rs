//! Error types for encounter setup and the state machine.

use crate::action::ActionError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::CombatantId;

/// Problems found while assembling an encounter. Reported before the state
/// machine leaves `Setup`, so no event has been emitted yet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("encounter has no combatants")]
    EmptyRoster,

    #[error("combatant id {id} is registered twice")]
    DuplicateId { id: CombatantId },

    #[error("encounter needs living combatants on both sides")]
    SingleSide,

    #[error("combatant {id} has no attacks")]
    NoAttacks { id: CombatantId },

    #[error("unknown creature {creature_id:?}")]
    UnknownCreature { creature_id: String },

    #[error("combatant {id} has invalid stats: {reason}")]
    InvalidStats {
        id: CombatantId,
        reason: &'static str,
    },

    /// The dice stream must be freshly seeded; rolls drawn before setup would
    /// make the encounter irreproducible from its seed.
    #[error("dice stream already drew {draws} dice before setup")]
    SeedConsumed { draws: u64 },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "SETUP_EMPTY_ROSTER",
            Self::DuplicateId { .. } => "SETUP_DUPLICATE_ID",
            Self::SingleSide => "SETUP_SINGLE_SIDE",
            Self::NoAttacks { .. } => "SETUP_NO_ATTACKS",
            Self::UnknownCreature { .. } => "SETUP_UNKNOWN_CREATURE",
            Self::InvalidStats { .. } => "SETUP_INVALID_STATS",
            Self::SeedConsumed { .. } => "SETUP_SEED_CONSUMED",
        }
    }
}

/// Errors surfaced while driving the state machine.
#[derive(Clone, Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// The submitted action was rejected. Nothing was mutated or logged.
    #[error("invalid action: {source}")]
    InvalidAction {
        #[source]
        source: ActionError,
        context: ErrorContext,
    },

    #[error("no action is awaited right now")]
    NotAwaitingAction { context: ErrorContext },

    #[error("encounter has already ended")]
    EncounterFinished { context: ErrorContext },
}

impl EngineError {
    /// The rejected action's error, if this is an InvalidAction failure.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            Self::InvalidAction { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Setup(err) => err.severity(),
            Self::InvalidAction { source, .. } => source.severity(),
            Self::NotAwaitingAction { .. } | Self::EncounterFinished { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Setup(_) => None,
            Self::InvalidAction { context, .. }
            | Self::NotAwaitingAction { context }
            | Self::EncounterFinished { context } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup(err) => err.error_code(),
            Self::InvalidAction { source, .. } => source.error_code(),
            Self::NotAwaitingAction { .. } => "ENGINE_NOT_AWAITING_ACTION",
            Self::EncounterFinished { .. } => "ENGINE_ENCOUNTER_FINISHED",
        }
    }
}
