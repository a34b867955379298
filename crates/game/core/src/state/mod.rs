//! Authoritative battle state.
//!
//! [`BattleState`] owns every combatant and the turn bookkeeping for one
//! encounter. Callers read it freely; only the engine mutates it.
pub mod types;

pub use types::{Combatant, CombatantId, Condition, Conditions, Phase, Side, TurnState};

/// Canonical snapshot of an encounter in progress.
///
/// Cloning yields a detached, read-only view suitable for handing to actor
/// policies across a suspension point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Seed the encounter's dice stream was created with.
    pub seed: u64,
    /// Combatants in registration order. Never shrinks during an encounter.
    combatants: Vec<Combatant>,
    pub turn: TurnState,
}

impl BattleState {
    pub fn new(seed: u64, combatants: Vec<Combatant>) -> Self {
        Self {
            seed,
            combatants,
            turn: TurnState::new(),
        }
    }

    /// All combatants, in registration order.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub(crate) fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_alive())
    }

    pub fn on_side(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(move |c| c.side == side)
    }

    /// Living combatants hostile to `side`, in registration order.
    pub fn living_opponents(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.living().filter(move |c| c.side != side)
    }

    pub fn side_alive(&self, side: Side) -> bool {
        self.on_side(side).any(Combatant::is_alive)
    }

    /// Whose turn it is, if any.
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.turn.current()
    }

    pub fn round(&self) -> u32 {
        self.turn.round
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }
}
