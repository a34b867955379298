//! Applying resolved outcomes.
//!
//! The resolver already computed every number; this step writes them into the
//! battle state and records the matching events, in a fixed order:
//! roll, damage, defeat.

use super::CombatEngine;
use crate::combat::{AttackOutcome, HealOutcome, Outcome};
use crate::event::EventKind;
use crate::state::Condition;

impl CombatEngine {
    pub(super) fn apply(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Attack(attack) => self.apply_attack(attack),
            Outcome::Defend { combatant } => {
                if let Some(actor) = self.state.combatant_mut(*combatant) {
                    actor.add_condition(Condition::Defending);
                }
                self.emit(EventKind::ConditionApplied {
                    combatant: *combatant,
                    condition: Condition::Defending,
                });
            }
            Outcome::Heal(heal) => self.apply_heal(heal),
            Outcome::Pass { combatant } => {
                self.emit(EventKind::Passed {
                    combatant: *combatant,
                });
            }
        }
    }

    fn apply_attack(&mut self, attack: &AttackOutcome) {
        let roll = &attack.roll;
        self.emit(EventKind::AttackRolled {
            attacker: attack.attacker,
            target: attack.target,
            attack: attack.attack_name.clone(),
            rolls: roll.rolls.clone(),
            natural: roll.natural,
            bonus: roll.bonus,
            total: roll.total,
            armor_class: roll.armor_class,
            mode: roll.mode,
            hit: roll.hit,
            critical: roll.critical,
        });

        let Some(damage) = &attack.damage else {
            return;
        };

        let Some(target) = self.state.combatant_mut(attack.target) else {
            return;
        };
        let was_alive = target.is_alive();
        let hp_after = target.take_damage(damage.amount);
        let now_defeated = target.is_defeated();
        debug_assert_eq!(hp_after, attack.hp_after);

        self.emit(EventKind::DamageDealt {
            attacker: attack.attacker,
            target: attack.target,
            rolls: damage.rolls.clone(),
            modifier: damage.modifier,
            amount: damage.amount,
            damage_type: damage.damage_type.clone(),
            hp_before: attack.hp_before,
            hp_after,
            max_hp: attack.max_hp,
        });

        if was_alive && now_defeated {
            self.emit(EventKind::CombatantDefeated {
                combatant: attack.target,
                by: Some(attack.attacker),
            });
        }
    }

    fn apply_heal(&mut self, heal: &HealOutcome) {
        let Some(actor) = self.state.combatant_mut(heal.combatant) else {
            return;
        };
        let hp_after = actor.restore(heal.amount);
        let charges_left = actor.spend_heal_charge();
        debug_assert_eq!(hp_after, heal.hp_after);
        debug_assert_eq!(charges_left, heal.charges_left);

        self.emit(EventKind::Healed {
            combatant: heal.combatant,
            rolls: heal.rolls.clone(),
            modifier: heal.modifier,
            amount: heal.amount,
            hp_before: heal.hp_before,
            hp_after,
            max_hp: heal.max_hp,
            charges_left,
        });
    }

    fn emit(&mut self, kind: EventKind) {
        self.log.emit(self.state.turn.round, kind);
    }
}
