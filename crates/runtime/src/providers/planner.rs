//! Monte Carlo planner for computer-controlled combatants.
//!
//! Every legal action is resolved several times against the current view,
//! each time with its own dice, and scored by how much it moves the HP
//! balance between the teams. The action with the best total wins.
//!
//! Simulation dice are seeded from a fork of the shared stream. The fork
//! leaves the shared stream untouched, so asking the planner never changes
//! the rolls the encounter itself goes on to make, and the same seed always
//! yields the same choice.

use async_trait::async_trait;
use game_core::combat::resolve;
use game_core::{Action, BattleState, CombatantId, Dice, Outcome, Side};

use crate::api::{ActionProvider, ActionRequest, Result, RuntimeError};

/// Points per HP of damage dealt to the other side.
const ENEMY_HP_WEIGHT: i64 = 10;
/// Points per HP lost on the planner's side; losing HP hurts more than dealing it.
const ALLY_HP_WEIGHT: i64 = 12;
/// Bonus for ending the encounter as the last side standing, penalty for the reverse.
const TERMINAL_BONUS: i64 = 100_000;

/// Difficulty knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Simulations per action; `0` still samples once.
    pub rollouts: u32,
    /// Chance in percent of picking a random legal action instead of planning.
    pub epsilon_percent: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rollouts: 50,
            epsilon_percent: 5,
        }
    }
}

/// One-ply lookahead policy. Team-based, so it works for any roster size.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlannerProvider {
    config: PlannerConfig,
}

impl PlannerProvider {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// Picks one of `legal` for `actor`. Draws nothing from `dice`.
    ///
    /// Returns `None` only when `legal` is empty.
    pub fn choose(
        &self,
        view: &BattleState,
        actor: CombatantId,
        legal: &[Action],
        dice: &Dice,
    ) -> Option<Action> {
        let first = legal.first()?;
        let Some(side) = view.combatant(actor).map(|me| me.side) else {
            return Some(first.clone());
        };

        let mut planning = Dice::seeded(fork_seed(&mut dice.clone()));

        if self.config.epsilon_percent > 0 && planning.roll_die(100) <= self.config.epsilon_percent
        {
            let sides = u32::try_from(legal.len()).unwrap_or(u32::MAX);
            let pick = (planning.roll_die(sides) - 1) as usize;
            return legal.get(pick).cloned();
        }

        let mut best = first;
        let mut best_score = i64::MIN;
        for action in legal {
            let score = self.score(view, side, action, &mut planning);
            if score > best_score {
                best_score = score;
                best = action;
            }
        }
        Some(best.clone())
    }

    /// Sum of the simulated scores. Every action gets the same number of
    /// samples, so sums compare like averages.
    fn score(&self, view: &BattleState, side: Side, action: &Action, planning: &mut Dice) -> i64 {
        let samples = self.config.rollouts.max(1);
        let mut total = 0i64;
        for _ in 0..samples {
            let mut dice = Dice::seeded(fork_seed(planning));
            match resolve(view, action, &mut dice) {
                Ok(outcome) => total = total.saturating_add(evaluate(view, side, &outcome)),
                Err(_) => return i64::MIN,
            }
        }
        total
    }
}

/// 64 bits from two draws.
fn fork_seed(dice: &mut Dice) -> u64 {
    let high = u64::from(dice.roll_die(u32::MAX) - 1);
    let low = u64::from(dice.roll_die(u32::MAX) - 1);
    (high << 32) | low
}

/// Score of `outcome` from `side`'s point of view. Positive is good for `side`.
fn evaluate(view: &BattleState, side: Side, outcome: &Outcome) -> i64 {
    let side_of = |id: CombatantId| view.combatant(id).map(|c| c.side);

    // HP lost per team; healing counts as negative loss.
    let (changed, lost, defeated) = match outcome {
        Outcome::Attack(attack) => (
            attack.target,
            i64::from(attack.hp_before) - i64::from(attack.hp_after),
            attack.defeated.then_some(attack.target),
        ),
        Outcome::Heal(heal) => (
            heal.combatant,
            i64::from(heal.hp_before) - i64::from(heal.hp_after),
            None,
        ),
        Outcome::Defend { .. } | Outcome::Pass { .. } => return 0,
    };

    let mut score = if side_of(changed) == Some(side) {
        -lost * ALLY_HP_WEIGHT
    } else {
        lost * ENEMY_HP_WEIGHT
    };

    let alive_after = |team: Side| {
        view.living().any(|c| c.side == team && Some(c.id) != defeated)
    };
    let ours = alive_after(side);
    let theirs = Side::ALL
        .into_iter()
        .any(|team| team != side && alive_after(team));

    if ours && !theirs {
        score += TERMINAL_BONUS;
    }
    if !ours && view.side_alive(side) {
        score -= TERMINAL_BONUS;
    }
    score
}

#[async_trait]
impl ActionProvider for PlannerProvider {
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
            rollouts = self.config.rollouts,
            "planned choice"
        );
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        AbilityScores, AttackProfile, Combatant, CreatureStats, DiceExpr, Phase, legal_actions,
    };

    const HERO: CombatantId = CombatantId(1);
    const OGRE: CombatantId = CombatantId(2);

    fn stats(name: &str, max_hp: u32, armor_class: i32) -> CreatureStats {
        CreatureStats {
            name: name.into(),
            abilities: AbilityScores::default(),
            max_hp,
            armor_class,
            attacks: vec![AttackProfile::new(
                "Club",
                2,
                DiceExpr::new(1, 4, 0).unwrap(),
                "bludgeoning",
            )],
        }
    }

    fn duel(hero: Combatant, foe: Combatant) -> BattleState {
        let mut state = BattleState::new(7, vec![hero, foe]);
        state.turn.phase = Phase::TurnActive;
        state.turn.order = vec![HERO, OGRE];
        state.turn.cursor = 0;
        state.turn.awaiting_action = true;
        state
    }

    fn pick(planner: PlannerProvider, state: &BattleState, dice: &Dice) -> Action {
        let legal = legal_actions(state, HERO);
        planner.choose(state, HERO, &legal, dice).unwrap()
    }

    fn no_exploration() -> PlannerProvider {
        PlannerProvider::new(PlannerConfig {
            rollouts: 20,
            epsilon_percent: 0,
        })
    }

    #[test]
    fn goes_for_the_finishing_blow() {
        let state = duel(
            Combatant::new(HERO, "Hero", Side::Players, stats("Hero", 20, 12)),
            Combatant::new(OGRE, "Ogre", Side::Enemies, stats("Ogre", 30, 12)).with_hp(1),
        );
        let action = pick(no_exploration(), &state, &Dice::seeded(4));
        assert_eq!(action, Action::attack(HERO, OGRE));
    }

    #[test]
    fn heals_rather_than_swinging_at_armor_it_cannot_pierce() {
        let state = duel(
            Combatant::new(HERO, "Hero", Side::Players, stats("Hero", 20, 12))
                .with_hp(2)
                .with_heals(1, DiceExpr::new(1, 8, 2).unwrap()),
            Combatant::new(OGRE, "Ogre", Side::Enemies, stats("Ogre", 100, 30)),
        );
        let action = pick(no_exploration(), &state, &Dice::seeded(4));
        assert_eq!(action, Action::heal(HERO));
    }

    #[test]
    fn planning_leaves_the_shared_stream_alone() {
        let state = duel(
            Combatant::new(HERO, "Hero", Side::Players, stats("Hero", 20, 12)),
            Combatant::new(OGRE, "Ogre", Side::Enemies, stats("Ogre", 30, 12)),
        );
        let dice = Dice::seeded(77);
        let first = pick(PlannerProvider::default(), &state, &dice);
        assert_eq!(dice.draws(), 0);
        assert_eq!(pick(PlannerProvider::default(), &state, &Dice::seeded(77)), first);
    }

    #[test]
    fn full_exploration_still_picks_a_legal_action() {
        let state = duel(
            Combatant::new(HERO, "Hero", Side::Players, stats("Hero", 20, 12)),
            Combatant::new(OGRE, "Ogre", Side::Enemies, stats("Ogre", 30, 12)),
        );
        let planner = PlannerProvider::new(PlannerConfig {
            rollouts: 1,
            epsilon_percent: 100,
        });
        let legal = legal_actions(&state, HERO);
        for seed in 0..20 {
            let action = planner
                .choose(&state, HERO, &legal, &Dice::seeded(seed))
                .unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn empty_legal_list_yields_nothing() {
        let state = duel(
            Combatant::new(HERO, "Hero", Side::Players, stats("Hero", 20, 12)),
            Combatant::new(OGRE, "Ogre", Side::Enemies, stats("Ogre", 30, 12)),
        );
        assert!(
            PlannerProvider::default()
                .choose(&state, HERO, &[], &Dice::seeded(1))
                .is_none()
        );
    }
}
