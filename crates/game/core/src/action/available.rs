//! The action catalog.
//!
//! [`legal_actions`] is the single place that decides what a combatant may do.
//! Policies pick from its output; the resolver re-checks membership before
//! anything is rolled.

use super::Action;
use crate::state::{BattleState, CombatantId, Condition};

/// Returns the ordered legal actions for `actor`.
///
/// The order is fixed and part of the contract, because the interactive
/// prompt numbers entries positionally and scripted policies break ties by
/// position:
///
/// 1. a basic attack against each living opponent, in registration order
/// 2. defend
/// 3. heal, if a charge is left and the actor is wounded
/// 4. pass
///
/// A stunned actor may only pass. Defeated or unknown actors, and the current
/// actor once its action is spent, get an empty list.
pub fn legal_actions(state: &BattleState, actor: CombatantId) -> Vec<Action> {
    let Some(combatant) = state.combatant(actor) else {
        return Vec::new();
    };
    if combatant.is_defeated() {
        return Vec::new();
    }
    if state.turn.current() == Some(actor) && !state.turn.awaiting_action {
        return Vec::new();
    }
    if combatant.has_condition(Condition::Stunned) {
        return vec![Action::pass(actor)];
    }

    let mut actions: Vec<Action> = state
        .living_opponents(combatant.side)
        .map(|target| Action::attack(actor, target.id))
        .collect();

    actions.push(Action::defend(actor));
    if combatant.can_heal() {
        actions.push(Action::heal(actor));
    }
    actions.push(Action::pass(actor));
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityScores, AttackProfile, CreatureStats, DiceExpr};
    use crate::state::{Combatant, Side};

    fn stats(name: &str) -> CreatureStats {
        CreatureStats {
            name: name.into(),
            abilities: AbilityScores::default(),
            max_hp: 10,
            armor_class: 12,
            attacks: vec![AttackProfile::new(
                "Club",
                2,
                DiceExpr::new(1, 4, 0).unwrap(),
                "bludgeoning",
            )],
        }
    }

    fn battle(combatants: Vec<Combatant>) -> BattleState {
        BattleState::new(0, combatants)
    }

    #[test]
    fn catalog_order_is_attacks_defend_heal_pass() {
        let hero = Combatant::new(CombatantId(1), "Hero", Side::Players, stats("Hero"))
            .with_hp(5)
            .with_heals(1, DiceExpr::new(1, 8, 2).unwrap());
        let a = Combatant::new(CombatantId(2), "A", Side::Enemies, stats("A"));
        let b = Combatant::new(CombatantId(3), "B", Side::Enemies, stats("B"));
        let state = battle(vec![hero, a, b]);

        let actions = legal_actions(&state, CombatantId(1));
        assert_eq!(
            actions,
            vec![
                Action::attack(CombatantId(1), CombatantId(2)),
                Action::attack(CombatantId(1), CombatantId(3)),
                Action::defend(CombatantId(1)),
                Action::heal(CombatantId(1)),
                Action::pass(CombatantId(1)),
            ]
        );
    }

    #[test]
    fn defeated_opponents_are_not_targets() {
        let hero = Combatant::new(CombatantId(1), "Hero", Side::Players, stats("Hero"));
        let dead = Combatant::new(CombatantId(2), "Dead", Side::Enemies, stats("Dead")).with_hp(0);
        let live = Combatant::new(CombatantId(3), "Live", Side::Enemies, stats("Live"));
        let state = battle(vec![hero, dead, live]);

        let actions = legal_actions(&state, CombatantId(1));
        assert!(!actions.contains(&Action::attack(CombatantId(1), CombatantId(2))));
        assert_eq!(actions[0], Action::attack(CombatantId(1), CombatantId(3)));
        assert_eq!(actions[1], Action::defend(CombatantId(1)));
    }

    #[test]
    fn heal_requires_charge_and_wound() {
        let full = Combatant::new(CombatantId(1), "Full", Side::Players, stats("Full"))
            .with_heals(2, DiceExpr::new(1, 8, 2).unwrap());
        let foe = Combatant::new(CombatantId(2), "Foe", Side::Enemies, stats("Foe"));
        let state = battle(vec![full, foe]);

        assert!(
            !legal_actions(&state, CombatantId(1)).contains(&Action::heal(CombatantId(1)))
        );
    }

    #[test]
    fn stunned_actor_may_only_pass() {
        let hero = Combatant::new(CombatantId(1), "Hero", Side::Players, stats("Hero"))
            .with_condition(Condition::Stunned);
        let foe = Combatant::new(CombatantId(2), "Foe", Side::Enemies, stats("Foe"));
        let state = battle(vec![hero, foe]);

        assert_eq!(
            legal_actions(&state, CombatantId(1)),
            vec![Action::pass(CombatantId(1))]
        );
    }

    #[test]
    fn defeated_and_unknown_actors_have_nothing() {
        let hero = Combatant::new(CombatantId(1), "Hero", Side::Players, stats("Hero")).with_hp(0);
        let foe = Combatant::new(CombatantId(2), "Foe", Side::Enemies, stats("Foe"));
        let state = battle(vec![hero, foe]);

        assert!(legal_actions(&state, CombatantId(1)).is_empty());
        assert!(legal_actions(&state, CombatantId(99)).is_empty());
    }

    #[test]
    fn catalog_is_deterministic() {
        let hero = Combatant::new(CombatantId(1), "Hero", Side::Players, stats("Hero"));
        let foe = Combatant::new(CombatantId(2), "Foe", Side::Enemies, stats("Foe"));
        let state = battle(vec![hero, foe]);

        assert_eq!(
            legal_actions(&state, CombatantId(1)),
            legal_actions(&state, CombatantId(1))
        );
    }
}
