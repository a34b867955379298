//! Damage rolls and application.

use crate::env::{AttackProfile, Dice};

use super::result::DamageRoll;

/// Rolls the damage expression of `attack`.
///
/// A critical hit rolls the expression twice and sums both results,
/// modifier included. The applied amount never goes below zero.
pub fn roll_damage(attack: &AttackProfile, critical: bool, dice: &mut Dice) -> DamageRoll {
    let mut roll = dice.roll_expr(&attack.damage);
    if critical {
        roll = roll.combine(dice.roll_expr(&attack.damage));
    }

    DamageRoll {
        amount: roll.amount(),
        rolls: roll.rolls,
        modifier: roll.modifier,
        damage_type: attack.damage_type.clone(),
    }
}

/// HP left after taking `amount` damage, floored at zero.
pub fn apply_damage(hp: u32, amount: u32) -> u32 {
    hp.saturating_sub(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::DiceExpr;

    fn dagger() -> AttackProfile {
        AttackProfile::new("Dagger", 4, DiceExpr::new(1, 4, 2).unwrap(), "piercing")
    }

    #[test]
    fn critical_doubles_the_dice() {
        let mut normal = Dice::seeded(21);
        let mut critical = Dice::seeded(21);

        let hit = roll_damage(&dagger(), false, &mut normal);
        let crit = roll_damage(&dagger(), true, &mut critical);

        assert_eq!(hit.rolls.len(), 1);
        assert_eq!(crit.rolls.len(), 2);
        assert_eq!(crit.rolls[0], hit.rolls[0]);
        assert_eq!(crit.modifier, 4);
        assert_eq!(critical.draws(), 2);
    }

    #[test]
    fn negative_damage_floors_at_zero() {
        let weak = AttackProfile::new("Poke", 0, DiceExpr::new(1, 1, -5).unwrap(), "piercing");
        let roll = roll_damage(&weak, false, &mut Dice::seeded(0));
        assert_eq!(roll.amount, 0);
    }

    #[test]
    fn hp_never_goes_negative() {
        assert_eq!(apply_damage(5, 3), 2);
        assert_eq!(apply_damage(5, 9), 0);
        assert_eq!(apply_damage(0, 1), 0);
    }
}
