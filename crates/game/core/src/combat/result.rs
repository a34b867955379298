//! Outcome records and the resolver entry point.

use crate::action::{Action, ActionError, ActionKind, validate};
use crate::env::{Dice, RollMode};
use crate::state::{BattleState, CombatantId};

use super::damage::{apply_damage, roll_damage};
use super::hit::{attack_mode, roll_attack};

/// Attack roll with every die that was drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRoll {
    pub mode: RollMode,
    /// d20s in draw order.
    pub rolls: Vec<u32>,
    /// The d20 that counts after advantage/disadvantage.
    pub natural: u32,
    pub bonus: i32,
    pub total: i32,
    pub armor_class: i32,
    pub hit: bool,
    pub critical: bool,
}

/// Damage dice for a hit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub rolls: Vec<u32>,
    pub modifier: i32,
    /// Dice plus modifier, floored at zero.
    pub amount: u32,
    pub damage_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub attacker: CombatantId,
    pub target: CombatantId,
    pub attack: usize,
    pub attack_name: String,
    pub roll: AttackRoll,
    /// `None` on a miss.
    pub damage: Option<DamageRoll>,
    pub hp_before: u32,
    pub hp_after: u32,
    pub max_hp: u32,
    /// The target drops to zero with this attack.
    pub defeated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOutcome {
    pub combatant: CombatantId,
    pub rolls: Vec<u32>,
    pub modifier: i32,
    /// HP actually restored after capping at max HP.
    pub amount: u32,
    pub hp_before: u32,
    pub hp_after: u32,
    pub max_hp: u32,
    pub charges_left: u32,
}

/// The resolved effect of one action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Attack(AttackOutcome),
    Defend {
        combatant: CombatantId,
    },
    Heal(HealOutcome),
    Pass {
        combatant: CombatantId,
    },
}

impl Outcome {
    pub fn actor(&self) -> CombatantId {
        match self {
            Outcome::Attack(attack) => attack.attacker,
            Outcome::Defend { combatant } | Outcome::Pass { combatant } => *combatant,
            Outcome::Heal(heal) => heal.combatant,
        }
    }
}

/// Resolves `action` against `state`, drawing from `dice`.
///
/// Validation runs first: an invalid action returns an error without drawing
/// a single die. The state is only read; resulting HP values are reported in
/// the outcome for the engine to apply.
pub fn resolve(
    state: &BattleState,
    action: &Action,
    dice: &mut Dice,
) -> Result<Outcome, ActionError> {
    validate(state, action)?;

    let actor = state
        .combatant(action.actor)
        .ok_or(ActionError::UnknownActor {
            actor: action.actor,
        })?;

    match action.kind {
        ActionKind::Attack { target, attack } => {
            let defender = state
                .combatant(target)
                .ok_or(ActionError::UnknownTarget { target })?;
            let profile = actor
                .stats
                .attacks
                .get(attack)
                .ok_or(ActionError::UnknownAttack {
                    actor: actor.id,
                    attack,
                })?;

            let roll = roll_attack(
                profile.attack_bonus,
                defender.armor_class(),
                attack_mode(defender),
                dice,
            );
            let damage = roll
                .hit
                .then(|| roll_damage(profile, roll.critical, dice));

            let hp_before = defender.hp();
            let hp_after = damage
                .as_ref()
                .map_or(hp_before, |d| apply_damage(hp_before, d.amount));

            Ok(Outcome::Attack(AttackOutcome {
                attacker: actor.id,
                target,
                attack,
                attack_name: profile.name.clone(),
                roll,
                damage,
                hp_before,
                hp_after,
                max_hp: defender.max_hp(),
                defeated: hp_after == 0,
            }))
        }
        ActionKind::Defend => Ok(Outcome::Defend {
            combatant: actor.id,
        }),
        ActionKind::Heal => {
            let roll = dice.roll_expr(&actor.heal_dice());
            let hp_before = actor.hp();
            let hp_after = hp_before
                .saturating_add(roll.amount())
                .min(actor.max_hp());

            Ok(Outcome::Heal(HealOutcome {
                combatant: actor.id,
                rolls: roll.rolls,
                modifier: roll.modifier,
                amount: hp_after - hp_before,
                hp_before,
                hp_after,
                max_hp: actor.max_hp(),
                charges_left: actor.heals_remaining().saturating_sub(1),
            }))
        }
        ActionKind::Pass => Ok(Outcome::Pass {
            combatant: actor.id,
        }),
    }
}
