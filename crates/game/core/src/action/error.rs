//! InvalidAction errors.
//!
//! Every variant means a policy or caller handed the engine an action outside
//! the actor's legal set. The engine rejects it before drawing any dice, so
//! nothing is mutated and nothing is logged.

use crate::error::{ErrorSeverity, GameError};
use crate::state::CombatantId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Actor id is not registered in this encounter.
    #[error("actor {actor} is not part of this encounter")]
    UnknownActor { actor: CombatantId },

    /// Actor has been defeated.
    #[error("actor {actor} is defeated and cannot act")]
    ActorDefeated { actor: CombatantId },

    /// Someone else holds the turn (or no turn is open).
    #[error("it is not {actor}'s turn")]
    NotCurrentActor {
        actor: CombatantId,
        current: Option<CombatantId>,
    },

    /// The actor already spent its action this turn.
    #[error("{actor} has already acted this turn")]
    AlreadyActed { actor: CombatantId },

    /// Stunned combatants may only pass.
    #[error("{actor} is stunned and may only pass")]
    Stunned { actor: CombatantId },

    /// Target id is not registered in this encounter.
    #[error("target {target} is not part of this encounter")]
    UnknownTarget { target: CombatantId },

    /// Target has already been defeated.
    #[error("target {target} is already defeated")]
    TargetDefeated { target: CombatantId },

    /// Attacks must target the opposing side.
    #[error("{actor} cannot attack ally {target}")]
    FriendlyTarget {
        actor: CombatantId,
        target: CombatantId,
    },

    /// Attack profile index out of range for the actor.
    #[error("{actor} has no attack #{attack}")]
    UnknownAttack { actor: CombatantId, attack: usize },

    /// Heal requested without a remaining charge.
    #[error("{actor} has no heal charges left")]
    NoHealCharges { actor: CombatantId },

    /// Heal requested at full health.
    #[error("{actor} is already at full health")]
    FullHealth { actor: CombatantId },

    /// Well-formed, but not offered by the action catalog.
    #[error("action is not in {actor}'s legal set")]
    NotLegal { actor: CombatantId },
}

impl ActionError {
    /// Combatant whose action was rejected.
    pub fn actor(&self) -> Option<CombatantId> {
        use ActionError::*;
        match self {
            UnknownActor { actor }
            | ActorDefeated { actor }
            | NotCurrentActor { actor, .. }
            | AlreadyActed { actor }
            | Stunned { actor }
            | FriendlyTarget { actor, .. }
            | UnknownAttack { actor, .. }
            | NoHealCharges { actor }
            | FullHealth { actor }
            | NotLegal { actor } => Some(*actor),
            UnknownTarget { .. } | TargetDefeated { .. } => None,
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            UnknownActor { .. } => "ACTION_UNKNOWN_ACTOR",
            ActorDefeated { .. } => "ACTION_ACTOR_DEFEATED",
            NotCurrentActor { .. } => "ACTION_NOT_CURRENT_ACTOR",
            AlreadyActed { .. } => "ACTION_ALREADY_ACTED",
            Stunned { .. } => "ACTION_STUNNED",
            UnknownTarget { .. } => "ACTION_UNKNOWN_TARGET",
            TargetDefeated { .. } => "ACTION_TARGET_DEFEATED",
            FriendlyTarget { .. } => "ACTION_FRIENDLY_TARGET",
            UnknownAttack { .. } => "ACTION_UNKNOWN_ATTACK",
            NoHealCharges { .. } => "ACTION_NO_HEAL_CHARGES",
            FullHealth { .. } => "ACTION_FULL_HEALTH",
            NotLegal { .. } => "ACTION_NOT_LEGAL",
        }
    }
}
