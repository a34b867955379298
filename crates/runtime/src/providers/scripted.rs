//! Deterministic policy for computer-controlled combatants.

use async_trait::async_trait;
use game_core::{Action, ActionKind, BattleState, CombatantId, Dice, GameConfig};

use crate::api::{ActionProvider, ActionRequest, Result, RuntimeError};

/// How the scripted policy picks between equally weak targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Earliest in catalog (registration) order. Draws no dice.
    #[default]
    FirstListed,
    /// One die drawn from the shared stream, sized to the number of ties.
    Roll,
}

/// Scripted combatant behavior.
///
/// In priority order:
/// 1. heal when at or below `1 / LOW_HP_DIVISOR` of max HP and a heal is legal
/// 2. attack the living enemy with the lowest current HP
/// 3. pass
///
/// The choice is a pure function of the battle state, the legal list and
/// (with [`TieBreak::Roll`]) the shared dice.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedProvider {
    tie_break: TieBreak,
}

impl ScriptedProvider {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Picks one of `legal` for `actor`.
    ///
    /// Returns `None` only when `legal` is empty.
    pub fn choose(
        &self,
        view: &BattleState,
        actor: CombatantId,
        legal: &[Action],
        dice: &mut Dice,
    ) -> Option<Action> {
        if let Some(heal) = self.heal_if_low(view, actor, legal) {
            return Some(heal);
        }
        if let Some(attack) = self.weakest_target(view, legal, dice) {
            return Some(attack);
        }

        legal
            .iter()
            .find(|action| action.kind == ActionKind::Pass)
            .or_else(|| legal.first())
            .cloned()
    }

    fn heal_if_low(
        &self,
        view: &BattleState,
        actor: CombatantId,
        legal: &[Action],
    ) -> Option<Action> {
        let me = view.combatant(actor)?;
        let low = me.hp().saturating_mul(GameConfig::LOW_HP_DIVISOR) <= me.max_hp();
        if !low {
            return None;
        }
        legal
            .iter()
            .find(|action| action.kind == ActionKind::Heal)
            .cloned()
    }

    fn weakest_target(
        &self,
        view: &BattleState,
        legal: &[Action],
        dice: &mut Dice,
    ) -> Option<Action> {
        let attacks: Vec<(&Action, u32)> = legal
            .iter()
            .filter_map(|action| {
                let target = view.combatant(action.target()?)?;
                target.is_alive().then_some((action, target.hp()))
            })
            .collect();

        let lowest = attacks.iter().map(|(_, hp)| *hp).min()?;
        let ties: Vec<&Action> = attacks
            .into_iter()
            .filter(|(_, hp)| *hp == lowest)
            .map(|(action, _)| action)
            .collect();

        let index = match self.tie_break {
            TieBreak::FirstListed => 0,
            TieBreak::Roll if ties.len() > 1 => {
                let sides = u32::try_from(ties.len()).unwrap_or(u32::MAX);
                (dice.roll_die(sides) - 1) as usize
            }
            TieBreak::Roll => 0,
        };
        ties.get(index).map(|action| (*action).clone())
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, request: &ActionRequest, dice: &mut Dice) -> Result<Action> {
        let action = self
            .choose(&request.view, request.actor, &request.legal, dice)
            .ok_or(RuntimeError::NoLegalActions {
                actor: request.actor,
            })?;

        tracing::debug!(
            target: "runtime::provider",
            actor = %request.actor,
            action = %action,
            "scripted choice"
        );
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        AbilityScores, AttackProfile, Combatant, CreatureStats, DiceExpr, Side, legal_actions,
    };

    fn stats(name: &str, max_hp: u32) -> CreatureStats {
        CreatureStats {
            name: name.into(),
            abilities: AbilityScores::default(),
            max_hp,
            armor_class: 12,
            attacks: vec![AttackProfile::new(
                "Club",
                2,
                DiceExpr::new(1, 4, 0).unwrap(),
                "bludgeoning",
            )],
        }
    }

    fn awaiting(mut state: BattleState, actor: CombatantId) -> BattleState {
        state.turn.phase = game_core::Phase::TurnActive;
        state.turn.order = state.combatants().iter().map(|c| c.id).collect();
        state.turn.cursor = state
            .turn
            .order
            .iter()
            .position(|id| *id == actor)
            .unwrap();
        state.turn.awaiting_action = true;
        state
    }

    fn skirmish(hero_hp: u32, heals: u32, goblin_hps: &[u32]) -> BattleState {
        let mut combatants = vec![
            Combatant::new(CombatantId(1), "Hero", Side::Players, stats("Hero", 20))
                .with_hp(hero_hp)
                .with_heals(heals, DiceExpr::new(1, 8, 2).unwrap()),
        ];
        for (i, hp) in goblin_hps.iter().enumerate() {
            let id = CombatantId(i as u32 + 2);
            combatants.push(
                Combatant::new(id, format!("Goblin {}", id.0), Side::Enemies, stats("Goblin", 7))
                    .with_hp(*hp),
            );
        }
        awaiting(BattleState::new(7, combatants), CombatantId(1))
    }

    fn pick(policy: ScriptedProvider, state: &BattleState, dice: &mut Dice) -> Action {
        let legal = legal_actions(state, CombatantId(1));
        policy.choose(state, CombatantId(1), &legal, dice).unwrap()
    }

    #[test]
    fn attacks_weakest_enemy() {
        let state = skirmish(20, 0, &[7, 3, 5]);
        let mut dice = Dice::seeded(1);
        let action = pick(ScriptedProvider::default(), &state, &mut dice);
        assert_eq!(action, Action::attack(CombatantId(1), CombatantId(3)));
        assert_eq!(dice.draws(), 0);
    }

    #[test]
    fn first_listed_breaks_ties_without_dice() {
        let state = skirmish(20, 0, &[4, 4]);
        let mut dice = Dice::seeded(1);
        let action = pick(ScriptedProvider::new(TieBreak::FirstListed), &state, &mut dice);
        assert_eq!(action, Action::attack(CombatantId(1), CombatantId(2)));
        assert_eq!(dice.draws(), 0);
    }

    #[test]
    fn rolled_tie_break_draws_from_shared_dice() {
        let state = skirmish(20, 0, &[4, 4]);
        let policy = ScriptedProvider::new(TieBreak::Roll);

        let mut dice = Dice::seeded(99);
        let first = pick(policy, &state, &mut dice);
        assert_eq!(dice.draws(), 1);

        let mut replay = Dice::seeded(99);
        assert_eq!(pick(policy, &state, &mut replay), first);
    }

    #[test]
    fn heals_when_low() {
        let state = skirmish(5, 1, &[7]);
        let action = pick(ScriptedProvider::default(), &state, &mut Dice::seeded(1));
        assert_eq!(action, Action::heal(CombatantId(1)));
    }

    #[test]
    fn attacks_when_low_without_charges() {
        let state = skirmish(5, 0, &[7]);
        let action = pick(ScriptedProvider::default(), &state, &mut Dice::seeded(1));
        assert_eq!(action, Action::attack(CombatantId(1), CombatantId(2)));
    }

    #[test]
    fn passes_when_stunned() {
        let combatants = vec![
            Combatant::new(CombatantId(1), "Hero", Side::Players, stats("Hero", 20))
                .with_condition(game_core::Condition::Stunned),
            Combatant::new(CombatantId(2), "Goblin", Side::Enemies, stats("Goblin", 7)),
        ];
        let state = awaiting(BattleState::new(7, combatants), CombatantId(1));
        let action = pick(ScriptedProvider::default(), &state, &mut Dice::seeded(1));
        assert_eq!(action, Action::pass(CombatantId(1)));
    }

    #[test]
    fn empty_legal_list_yields_nothing() {
        let state = skirmish(20, 0, &[7]);
        let policy = ScriptedProvider::default();
        assert!(
            policy
                .choose(&state, CombatantId(1), &[], &mut Dice::seeded(1))
                .is_none()
        );
    }
}
