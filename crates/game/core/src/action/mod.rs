//! Actions: what a combatant intends to do on its turn.
//!
//! - `available`: the ordered catalog of legal actions for a combatant
//! - `validate`: structural and legality checks run before any die is drawn
//! - `error`: [`ActionError`], the InvalidAction taxonomy
//!
//! New action kinds are added to [`ActionKind`], the catalog and the resolver;
//! the state machine treats every kind uniformly.
pub mod available;
pub mod error;
pub mod validate;

pub use available::legal_actions;
pub use error::ActionError;
pub use validate::validate;

use core::fmt;

use crate::state::CombatantId;

/// A combatant's intent for its turn. Consumed once by the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub actor: CombatantId,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(actor: CombatantId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    /// Basic attack (profile 0) against `target`.
    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::Attack { target, attack: 0 })
    }

    pub fn defend(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Defend)
    }

    pub fn heal(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Heal)
    }

    pub fn pass(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Pass)
    }

    /// The combatant this action is aimed at, if any.
    pub fn target(&self) -> Option<CombatantId> {
        self.kind.target()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Attack { target, attack } => {
                write!(f, "{} attacks {} (attack {})", self.actor, target, attack)
            }
            kind => write!(f, "{} {}", self.actor, kind.as_ref()),
        }
    }
}

/// Kinds of action a combatant can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// Attack roll against `target` using the actor's attack profile `attack`.
    Attack { target: CombatantId, attack: usize },
    /// Impose disadvantage on incoming attacks until the actor's next turn.
    Defend,
    /// Spend a heal charge to restore HP.
    Heal,
    /// Do nothing.
    Pass,
}

impl ActionKind {
    pub fn target(&self) -> Option<CombatantId> {
        match self {
            ActionKind::Attack { target, .. } => Some(*target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ActionKind::Defend.as_ref(), "defend");
        assert_eq!(
            ActionKind::Attack {
                target: CombatantId(2),
                attack: 0
            }
            .as_ref(),
            "attack"
        );
    }

    #[test]
    fn only_attacks_have_targets() {
        assert_eq!(
            Action::attack(CombatantId(1), CombatantId(2)).target(),
            Some(CombatantId(2))
        );
        assert_eq!(Action::pass(CombatantId(1)).target(), None);
    }
}
