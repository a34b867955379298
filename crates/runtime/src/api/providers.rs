//! Asynchronous abstraction for sourcing combatant intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so an encounter
//! can run with human input, scripted policies, or test fixtures.
use async_trait::async_trait;
use game_core::{Action, BattleState, CombatantId, Dice};

use super::errors::Result;

/// Everything a provider may look at when choosing an action.
///
/// `view` is a snapshot taken when the actor was prompted; mutating it has
/// no effect on the encounter.
#[derive(Clone, Debug)]
pub struct ActionRequest {
    pub actor: CombatantId,
    pub view: BattleState,
    /// Legal actions in catalog order. Never empty for a prompted actor.
    pub legal: Vec<Action>,
}

impl ActionRequest {
    pub fn new(actor: CombatantId, view: BattleState, legal: Vec<Action>) -> Self {
        Self { actor, view, legal }
    }
}

/// Trait for providing actions based on the current battle state.
///
/// Implementations must return one of `request.legal`; anything else is
/// rejected by the engine. Randomness, if any, must come from `dice` so that
/// a seed replays the whole encounter.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn provide_action(&self, request: &ActionRequest, dice: &mut Dice) -> Result<Action>;
}

/// A provider that always passes. Useful for testing or as a fallback.
pub struct PassActionProvider;

#[async_trait]
impl ActionProvider for PassActionProvider {
    async fn provide_action(&self, request: &ActionRequest, _dice: &mut Dice) -> Result<Action> {
        Ok(Action::pass(request.actor))
    }
}
