//! Initiative scheduling.
//!
//! Every combatant rolls once, in registration order, at setup. The resulting
//! order holds for the whole encounter; rounds never re-roll.

use crate::config::GameConfig;
use crate::env::Dice;
use crate::state::{Combatant, CombatantId};

/// One combatant's initiative roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeRoll {
    pub combatant: CombatantId,
    pub roll: u32,
    pub modifier: i32,
    pub total: i32,
    /// Registration index, the last tie-breaker.
    pub registration: usize,
}

/// Draws one initiative die per combatant, in registration order.
pub fn roll_initiative(combatants: &[Combatant], dice: &mut Dice) -> Vec<InitiativeRoll> {
    combatants
        .iter()
        .enumerate()
        .map(|(registration, combatant)| {
            let roll = dice.roll_die(GameConfig::INITIATIVE_DIE);
            let modifier = combatant.initiative_modifier();
            InitiativeRoll {
                combatant: combatant.id,
                roll,
                modifier,
                total: roll as i32 + modifier,
                registration,
            }
        })
        .collect()
}

/// Sorts rolls into turn order without drawing more dice.
///
/// Higher total first; ties go to the higher modifier, then to whoever was
/// registered first.
pub fn turn_order(rolls: &[InitiativeRoll]) -> Vec<CombatantId> {
    let mut sorted = rolls.to_vec();
    sorted.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(b.modifier.cmp(&a.modifier))
            .then(a.registration.cmp(&b.registration))
    });
    sorted.into_iter().map(|entry| entry.combatant).collect()
}
