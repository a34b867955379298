//! Attack rolls.

use crate::config::GameConfig;
use crate::env::{Dice, RollMode};
use crate::state::{Combatant, Condition};

use super::result::AttackRoll;

/// Advantage state for an attack against `defender`.
///
/// Defending targets impose disadvantage.
pub fn attack_mode(defender: &Combatant) -> RollMode {
    if defender.has_condition(Condition::Defending) {
        RollMode::Disadvantage
    } else {
        RollMode::Normal
    }
}

/// Hit rule: a natural critical always hits, otherwise `total >= armor_class`.
pub fn check_hit(natural: u32, total: i32, armor_class: i32) -> bool {
    natural >= GameConfig::CRITICAL_ROLL || total >= armor_class
}

/// Rolls the d20 for an attack and records every die drawn.
pub fn roll_attack(
    bonus: i32,
    armor_class: i32,
    mode: RollMode,
    dice: &mut Dice,
) -> AttackRoll {
    let d20 = dice.roll_d20(mode);
    let natural = d20.natural;
    let total = natural as i32 + bonus;
    let critical = natural >= GameConfig::CRITICAL_ROLL;

    AttackRoll {
        mode,
        rolls: d20.rolls,
        natural,
        bonus,
        total,
        armor_class,
        hit: check_hit(natural, total, armor_class),
        critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meets_it_beats_it() {
        assert!(check_hit(10, 13, 13));
        assert!(!check_hit(10, 12, 13));
    }

    #[test]
    fn natural_twenty_always_hits() {
        assert!(check_hit(20, 21, 30));
    }

    #[test]
    fn attack_roll_records_dice_and_total() {
        let mut dice = Dice::seeded(11);
        let roll = roll_attack(5, 13, RollMode::Normal, &mut dice);

        assert_eq!(roll.rolls.len(), 1);
        assert_eq!(roll.natural, roll.rolls[0]);
        assert_eq!(roll.total, roll.natural as i32 + 5);
        assert_eq!(roll.hit, roll.critical || roll.total >= 13);
    }

    #[test]
    fn disadvantage_keeps_the_lower_die() {
        let mut dice = Dice::seeded(3);
        let roll = roll_attack(0, 10, RollMode::Disadvantage, &mut dice);

        assert_eq!(roll.rolls.len(), 2);
        assert_eq!(roll.natural, roll.rolls[0].min(roll.rolls[1]));
    }
}
