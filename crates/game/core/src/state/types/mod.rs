pub mod combatant;
pub mod common;
pub mod turn;

pub use combatant::{Combatant, Condition, Conditions};
pub use common::{CombatantId, Side};
pub use turn::{Phase, TurnState};
