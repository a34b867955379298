//! Pre-resolution checks.
//!
//! [`validate`] runs before the resolver touches the dice stream, so a rejected
//! action leaves both the battle state and the dice untouched.

use super::{Action, ActionError, ActionKind, legal_actions};
use crate::state::{BattleState, Condition, Phase};

/// Checks that `action` is one the actor may take right now.
///
/// The specific checks come first so the error names the actual problem;
/// the final membership test guarantees the action is in the catalog.
pub fn validate(state: &BattleState, action: &Action) -> Result<(), ActionError> {
    let actor = state
        .combatant(action.actor)
        .ok_or(ActionError::UnknownActor {
            actor: action.actor,
        })?;

    if actor.is_defeated() {
        return Err(ActionError::ActorDefeated { actor: actor.id });
    }

    let current = state.turn.current();
    if state.turn.phase != Phase::TurnActive || current != Some(actor.id) {
        return Err(ActionError::NotCurrentActor {
            actor: actor.id,
            current,
        });
    }
    if !state.turn.awaiting_action {
        return Err(ActionError::AlreadyActed { actor: actor.id });
    }

    if actor.has_condition(Condition::Stunned) && action.kind != ActionKind::Pass {
        return Err(ActionError::Stunned { actor: actor.id });
    }

    match action.kind {
        ActionKind::Attack { target, attack } => {
            let defender = state
                .combatant(target)
                .ok_or(ActionError::UnknownTarget { target })?;
            if defender.is_defeated() {
                return Err(ActionError::TargetDefeated { target });
            }
            if !actor.is_hostile_to(defender) {
                return Err(ActionError::FriendlyTarget {
                    actor: actor.id,
                    target,
                });
            }
            if attack >= actor.stats.attacks.len() {
                return Err(ActionError::UnknownAttack {
                    actor: actor.id,
                    attack,
                });
            }
        }
        ActionKind::Heal => {
            if actor.heals_remaining() == 0 {
                return Err(ActionError::NoHealCharges { actor: actor.id });
            }
            if actor.hp() >= actor.max_hp() {
                return Err(ActionError::FullHealth { actor: actor.id });
            }
        }
        ActionKind::Defend | ActionKind::Pass => {}
    }

    if !legal_actions(state, actor.id).contains(action) {
        return Err(ActionError::NotLegal { actor: actor.id });
    }

    Ok(())
}
