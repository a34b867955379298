//! Turns log events into narration lines.

use std::collections::HashMap;

use game_core::{
    Action, ActionKind, BattleState, CombatantId, EndReason, Event, EventKind, RollMode,
};

use crate::config::CliConfig;

/// Stateful event renderer.
///
/// Names are learned from `EncounterStarted`, so a narrator can render any
/// suffix of a log as long as it saw the first event.
#[derive(Clone, Debug, Default)]
pub struct Narrator {
    names: HashMap<CombatantId, String>,
    show_rolls: bool,
    show_initiative: bool,
}

impl Narrator {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            names: HashMap::new(),
            show_rolls: config.show_rolls,
            show_initiative: config.show_initiative,
        }
    }

    /// Display name of a combatant, or its id if unknown.
    pub fn name(&self, id: CombatantId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// Renders one event. `None` means the event is hidden by configuration.
    pub fn render(&mut self, event: &Event) -> Option<String> {
        let line = match &event.kind {
            EventKind::EncounterStarted { seed, combatants } => {
                for summary in combatants {
                    self.names.insert(summary.id, summary.name.clone());
                }
                let roster: Vec<String> = combatants
                    .iter()
                    .map(|c| {
                        format!(
                            "{} ({}, {}/{} HP, AC {})",
                            c.name, c.side, c.hp, c.max_hp, c.armor_class
                        )
                    })
                    .collect();
                format!("Encounter begins (seed {}): {}", seed, roster.join(", "))
            }
            EventKind::InitiativeRolled {
                combatant,
                roll,
                modifier,
                total,
            } => {
                if !self.show_initiative {
                    return None;
                }
                format!(
                    "  {} rolls initiative: {} {} = {}",
                    self.name(*combatant),
                    roll,
                    signed(*modifier),
                    total
                )
            }
            EventKind::TurnOrderSet { order } => {
                let names: Vec<String> = order.iter().map(|id| self.name(*id)).collect();
                format!("Turn order: {}", names.join(" > "))
            }
            EventKind::RoundStarted { round } => format!("\n=== Round {} ===", round),
            EventKind::TurnStarted { combatant } => format!("-- {}'s turn", self.name(*combatant)),
            EventKind::TurnSkipped { combatant } => {
                format!("-- {} is down; turn skipped", self.name(*combatant))
            }
            EventKind::ConditionApplied {
                combatant,
                condition,
            } => format!("  {} is now {}", self.name(*combatant), condition),
            EventKind::ConditionRemoved {
                combatant,
                condition,
            } => format!("  {} is no longer {}", self.name(*combatant), condition),
            EventKind::AttackRolled {
                attacker,
                target,
                attack,
                rolls,
                natural,
                bonus,
                total,
                armor_class,
                mode,
                hit,
                critical,
            } => {
                let verdict = match (hit, critical) {
                    (true, true) => "CRITICAL HIT",
                    (true, false) => "hit",
                    (false, _) => "miss",
                };
                let dice = if self.show_rolls && *mode != RollMode::Normal {
                    format!(" [{} of {}]", mode, join(rolls))
                } else {
                    String::new()
                };
                format!(
                    "  {} attacks {} with {}: {} {} = {}{} vs AC {} -> {}",
                    self.name(*attacker),
                    self.name(*target),
                    attack,
                    natural,
                    signed(*bonus),
                    total,
                    dice,
                    armor_class,
                    verdict
                )
            }
            EventKind::DamageDealt {
                target,
                rolls,
                modifier,
                amount,
                damage_type,
                hp_before,
                hp_after,
                max_hp,
                ..
            } => {
                let dice = if self.show_rolls {
                    format!(" [{} {}]", join(rolls), signed(*modifier))
                } else {
                    String::new()
                };
                format!(
                    "  {} {} damage{}; {} {} -> {}/{} HP",
                    amount,
                    damage_type,
                    dice,
                    self.name(*target),
                    hp_before,
                    hp_after,
                    max_hp
                )
            }
            EventKind::Healed {
                combatant,
                rolls,
                modifier,
                amount,
                hp_before,
                hp_after,
                max_hp,
                charges_left,
            } => {
                let dice = if self.show_rolls {
                    format!(" [{} {}]", join(rolls), signed(*modifier))
                } else {
                    String::new()
                };
                format!(
                    "  {} heals {}{}; {} -> {}/{} HP, {} {} left",
                    self.name(*combatant),
                    amount,
                    dice,
                    hp_before,
                    hp_after,
                    max_hp,
                    charges_left,
                    if *charges_left == 1 { "charge" } else { "charges" }
                )
            }
            EventKind::Passed { combatant } => format!("  {} passes", self.name(*combatant)),
            EventKind::CombatantDefeated { combatant, by } => match by {
                Some(by) => format!(
                    "  {} is defeated by {}!",
                    self.name(*combatant),
                    self.name(*by)
                ),
                None => format!("  {} is defeated!", self.name(*combatant)),
            },
            EventKind::EncounterEnded {
                winner,
                reason,
                rounds,
            } => {
                let verdict = match (winner, reason) {
                    (Some(side), _) => format!("{} win", side),
                    (None, EndReason::MutualDefeat) => "no winner: everyone fell".to_owned(),
                    (None, EndReason::RoundLimit) => "no winner: round limit reached".to_owned(),
                    (None, EndReason::SideEliminated) => "no winner".to_owned(),
                };
                format!("\nEncounter over after {} rounds: {}", rounds, verdict)
            }
        };
        Some(line)
    }

    /// Label for an action in a numbered prompt.
    pub fn describe_action(&self, view: &BattleState, action: &Action) -> String {
        match action.kind {
            ActionKind::Attack { target, attack } => {
                let weapon = view
                    .combatant(action.actor)
                    .and_then(|actor| actor.stats.attacks.get(attack))
                    .map(|profile| format!(" with {} ({})", profile.name, profile.damage))
                    .unwrap_or_default();
                let target_hp = view
                    .combatant(target)
                    .map(|t| format!(" [{}/{} HP, AC {}]", t.hp(), t.max_hp(), t.armor_class()))
                    .unwrap_or_default();
                format!("Attack {}{}{}", self.name(target), target_hp, weapon)
            }
            ActionKind::Defend => "Defend (attacks against you roll with disadvantage)".to_owned(),
            ActionKind::Heal => {
                let detail = view
                    .combatant(action.actor)
                    .map(|me| format!(" ({}, {} left)", me.heal_dice(), me.heals_remaining()))
                    .unwrap_or_default();
                format!("Heal{}", detail)
            }
            ActionKind::Pass => "Pass".to_owned(),
        }
    }
}

fn signed(value: i32) -> String {
    if value < 0 {
        format!("- {}", value.unsigned_abs())
    } else {
        format!("+ {}", value)
    }
}

fn join(rolls: &[u32]) -> String {
    rolls
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
