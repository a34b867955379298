//! Combat state machine.
//!
//! [`CombatEngine`] owns the battle state and the event log for one encounter
//! and is the only code that mutates either. It is a synchronous stepper:
//! [`CombatEngine::advance`] runs the lifecycle until a combatant owes an
//! action (or the encounter ends), and [`CombatEngine::submit`] resolves that
//! action. Whatever happens between the two calls (a scripted choice, a
//! human typing) cannot touch the state.
//!
//! ```text
//! Setup -> RoundStart -> TurnActive -> TurnResolved -> (RoundStart | Ended)
//! ```

mod builder;
mod errors;
mod initiative;
mod transition;

pub use builder::{EncounterBuilder, SpawnOptions};
pub use errors::{EngineError, SetupError};
pub use initiative::{InitiativeRoll, roll_initiative, turn_order};

use crate::action::{Action, legal_actions};
use crate::combat::{Outcome, resolve};
use crate::config::GameConfig;
use crate::env::Dice;
use crate::error::ErrorContext;
use crate::event::{CombatantSummary, EndReason, EventKind, EventLog};
use crate::state::{BattleState, CombatantId, Condition, Phase, Side};

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterOutcome {
    /// `None` when nobody won (mutual defeat or round limit).
    pub winner: Option<Side>,
    pub reason: EndReason,
    /// Rounds started before the end.
    pub rounds: u32,
}

/// Where the state machine stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// `actor` must act; call [`CombatEngine::submit`].
    AwaitingAction { actor: CombatantId },
    /// Terminal. The log ends with `EncounterEnded`.
    Finished(EncounterOutcome),
}

/// Authoritative driver of one encounter.
#[derive(Clone, Debug)]
pub struct CombatEngine {
    state: BattleState,
    log: EventLog,
    config: GameConfig,
    outcome: Option<EncounterOutcome>,
}

impl CombatEngine {
    pub(crate) fn new(state: BattleState, config: GameConfig) -> Self {
        Self {
            state,
            log: EventLog::new(),
            config,
            outcome: None,
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<&EncounterOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The combatant owing an action, if any.
    pub fn awaiting(&self) -> Option<CombatantId> {
        (self.state.turn.phase == Phase::TurnActive && self.state.turn.awaiting_action)
            .then(|| self.state.current_actor())
            .flatten()
    }

    /// Legal actions for the combatant owing an action (empty otherwise).
    pub fn legal_actions(&self) -> Vec<Action> {
        self.awaiting()
            .map(|actor| legal_actions(&self.state, actor))
            .unwrap_or_default()
    }

    /// Runs the lifecycle until an action is owed or the encounter ends.
    ///
    /// Calling it again while an action is owed, or after the end, returns
    /// the same step without side effects.
    pub fn advance(&mut self, dice: &mut Dice) -> Result<Step, EngineError> {
        loop {
            match self.state.turn.phase {
                Phase::Setup => self.setup(dice),
                Phase::RoundStart => self.start_round(),
                Phase::TurnActive => {
                    if let Some(actor) = self.awaiting() {
                        return Ok(Step::AwaitingAction { actor });
                    }
                    self.start_turn();
                }
                Phase::TurnResolved => self.resolve_turn(),
                Phase::Ended => {
                    return self.outcome.map(Step::Finished).ok_or_else(|| {
                        EngineError::EncounterFinished {
                            context: self
                                .error_context()
                                .with_message("ended without an outcome"),
                        }
                    });
                }
            }
        }
    }

    /// Resolves `action` for the combatant owing one.
    ///
    /// Atomic: on error the state, the log and the dice are exactly as before.
    pub fn submit(&mut self, action: Action, dice: &mut Dice) -> Result<Outcome, EngineError> {
        if self.is_finished() {
            return Err(EngineError::EncounterFinished {
                context: self.error_context(),
            });
        }
        if self.awaiting().is_none() {
            return Err(EngineError::NotAwaitingAction {
                context: self.error_context().with_actor(action.actor),
            });
        }

        let outcome = resolve(&self.state, &action, dice).map_err(|source| {
            EngineError::InvalidAction {
                source,
                context: self
                    .error_context()
                    .with_actor(action.actor)
                    .with_message("action rejected before any roll"),
            }
        })?;

        self.apply(&outcome);

        // Stun lasts for one of the combatant's own turns.
        let round = self.state.turn.round;
        let stun_expired = self
            .state
            .combatant_mut(action.actor)
            .is_some_and(|actor| actor.remove_condition(Condition::Stunned));
        if stun_expired {
            self.log.emit(
                round,
                EventKind::ConditionRemoved {
                    combatant: action.actor,
                    condition: Condition::Stunned,
                },
            );
        }

        self.state.turn.awaiting_action = false;
        self.state.turn.phase = Phase::TurnResolved;
        Ok(outcome)
    }

    /// Drives the encounter to the end, asking `choose` for every action.
    ///
    /// `choose` receives the battle state, the actor, its legal actions and
    /// the shared dice stream.
    pub fn run<F>(
        &mut self,
        dice: &mut Dice,
        mut choose: F,
    ) -> Result<EncounterOutcome, EngineError>
    where
        F: FnMut(&BattleState, CombatantId, &[Action], &mut Dice) -> Action,
    {
        loop {
            match self.advance(dice)? {
                Step::Finished(outcome) => return Ok(outcome),
                Step::AwaitingAction { actor } => {
                    let legal = self.legal_actions();
                    let action = choose(&self.state, actor, &legal, dice);
                    self.submit(action, dice)?;
                }
            }
        }
    }

    // ===== lifecycle =====

    fn setup(&mut self, dice: &mut Dice) {
        let combatants = self
            .state
            .combatants()
            .iter()
            .map(CombatantSummary::from)
            .collect();
        self.log.emit(
            0,
            EventKind::EncounterStarted {
                seed: self.state.seed,
                combatants,
            },
        );

        let rolls = roll_initiative(self.state.combatants(), dice);
        for roll in &rolls {
            if let Some(combatant) = self.state.combatant_mut(roll.combatant) {
                combatant.set_initiative(roll.total);
            }
            self.log.emit(
                0,
                EventKind::InitiativeRolled {
                    combatant: roll.combatant,
                    roll: roll.roll,
                    modifier: roll.modifier,
                    total: roll.total,
                },
            );
        }

        let order = turn_order(&rolls);
        self.log
            .emit(0, EventKind::TurnOrderSet { order: order.clone() });
        self.state.turn.order = order;
        self.state.turn.phase = Phase::RoundStart;
    }

    fn start_round(&mut self) {
        let next = self.state.turn.round + 1;
        if next > self.config.max_rounds {
            self.finish(None, EndReason::RoundLimit);
            return;
        }

        self.state.turn.round = next;
        self.state.turn.cursor = 0;
        self.state.turn.awaiting_action = false;
        self.log.emit(next, EventKind::RoundStarted { round: next });
        self.state.turn.phase = Phase::TurnActive;
    }

    fn start_turn(&mut self) {
        let round = self.state.turn.round;
        let Some(id) = self.state.current_actor() else {
            self.state.turn.phase = Phase::TurnResolved;
            return;
        };
        let Some(combatant) = self.state.combatant_mut(id) else {
            self.state.turn.phase = Phase::TurnResolved;
            return;
        };

        if combatant.is_defeated() {
            self.log
                .emit(round, EventKind::TurnSkipped { combatant: id });
            self.state.turn.phase = Phase::TurnResolved;
            return;
        }

        let was_defending = combatant.remove_condition(Condition::Defending);
        self.log
            .emit(round, EventKind::TurnStarted { combatant: id });
        if was_defending {
            self.log.emit(
                round,
                EventKind::ConditionRemoved {
                    combatant: id,
                    condition: Condition::Defending,
                },
            );
        }
        self.state.turn.awaiting_action = true;
    }

    fn resolve_turn(&mut self) {
        if let Some((winner, reason)) = self.end_condition() {
            self.finish(winner, reason);
            return;
        }

        self.state.turn.cursor += 1;
        self.state.turn.phase = if self.state.turn.cursor >= self.state.turn.order.len() {
            Phase::RoundStart
        } else {
            Phase::TurnActive
        };
    }

    fn end_condition(&self) -> Option<(Option<Side>, EndReason)> {
        let standing: Vec<Side> = Side::ALL
            .into_iter()
            .filter(|&side| self.state.side_alive(side))
            .collect();
        match standing.as_slice() {
            [] => Some((None, EndReason::MutualDefeat)),
            [winner] => Some((Some(*winner), EndReason::SideEliminated)),
            _ => None,
        }
    }

    fn finish(&mut self, winner: Option<Side>, reason: EndReason) {
        let rounds = self.state.turn.round;
        let outcome = EncounterOutcome {
            winner,
            reason,
            rounds,
        };
        self.log.emit(
            rounds,
            EventKind::EncounterEnded {
                winner,
                reason,
                rounds,
            },
        );
        self.state.turn.awaiting_action = false;
        self.state.turn.phase = Phase::Ended;
        self.outcome = Some(outcome);
    }

    fn error_context(&self) -> ErrorContext {
        ErrorContext::new(self.state.turn.round, self.log.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityScores, AttackProfile, CreatureStats, DiceExpr};
    use crate::state::Combatant;

    fn fighter(id: u32, side: Side) -> Combatant {
        let stats = CreatureStats {
            name: format!("Fighter {id}"),
            abilities: AbilityScores::default(),
            max_hp: 10,
            armor_class: 12,
            attacks: vec![AttackProfile::new(
                "Sword",
                3,
                DiceExpr::new(1, 8, 0).unwrap(),
                "slashing",
            )],
        };
        Combatant::new(CombatantId(id), stats.name.clone(), side, stats)
    }

    #[test]
    fn nobody_standing_ends_without_a_winner() {
        let mut builder = EncounterBuilder::new();
        builder
            .add(fighter(1, Side::Players))
            .add(fighter(2, Side::Enemies));
        let mut dice = Dice::seeded(5);
        let mut engine = builder.build(&dice).unwrap();

        let Step::AwaitingAction { actor } = engine.advance(&mut dice).unwrap() else {
            panic!("expected a turn");
        };
        engine.submit(Action::pass(actor), &mut dice).unwrap();
        assert_eq!(engine.state.turn.phase, Phase::TurnResolved);

        // Both sides fall at once, e.g. to a shared hazard.
        for id in [CombatantId(1), CombatantId(2)] {
            engine.state.combatant_mut(id).unwrap().take_damage(100);
        }

        let step = engine.advance(&mut dice).unwrap();
        assert_eq!(
            step,
            Step::Finished(EncounterOutcome {
                winner: None,
                reason: EndReason::MutualDefeat,
                rounds: 1,
            })
        );
        assert!(matches!(
            engine.log().last().unwrap().kind,
            EventKind::EncounterEnded {
                winner: None,
                reason: EndReason::MutualDefeat,
                rounds: 1,
            }
        ));

        // Terminal: further steps change nothing.
        let len = engine.log().len();
        assert_eq!(engine.advance(&mut dice).unwrap(), step);
        assert!(matches!(
            engine.submit(Action::pass(actor), &mut dice),
            Err(EngineError::EncounterFinished { .. })
        ));
        assert_eq!(engine.log().len(), len);
    }
}
