//! Encounter assembly.

use std::collections::HashSet;

use super::CombatEngine;
use super::errors::SetupError;
use crate::config::GameConfig;
use crate::env::{CreatureOracle, Dice, DiceExpr};
use crate::state::{BattleState, Combatant, CombatantId, Condition, Side};

/// Per-instance overrides applied when spawning a creature from an oracle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnOptions {
    /// Display name; defaults to the creature name, numbered on repeats.
    pub name: Option<String>,
    /// Starting HP (clamped to max HP).
    pub hp: Option<u32>,
    pub max_hp: Option<u32>,
    pub armor_class: Option<i32>,
    pub heals: u32,
    pub heal_dice: Option<DiceExpr>,
    pub conditions: Vec<Condition>,
}

impl SpawnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = Some(max_hp);
        self
    }

    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = Some(armor_class);
        self
    }

    pub fn with_heals(mut self, charges: u32) -> Self {
        self.heals = charges;
        self
    }

    pub fn with_heal_dice(mut self, dice: DiceExpr) -> Self {
        self.heal_dice = Some(dice);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// Registers combatants and produces an initialized [`CombatEngine`].
///
/// Registration order matters: it drives initiative draw order, the final
/// initiative tie-break and the order of attack entries in the action catalog.
#[derive(Clone, Debug, Default)]
pub struct EncounterBuilder {
    combatants: Vec<Combatant>,
    config: GameConfig,
}

impl EncounterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fully built combatant as-is.
    pub fn add(&mut self, combatant: Combatant) -> &mut Self {
        self.combatants.push(combatant);
        self
    }

    /// Looks up `creature_id` and registers a new instance on `side`.
    ///
    /// The instance gets the next free id. Repeated creatures are numbered
    /// ("Goblin", "Goblin 2", ...) unless a name is supplied.
    pub fn spawn(
        &mut self,
        oracle: &dyn CreatureOracle,
        creature_id: &str,
        side: Side,
        options: SpawnOptions,
    ) -> Result<CombatantId, SetupError> {
        let mut stats = oracle
            .creature(creature_id)
            .ok_or_else(|| SetupError::UnknownCreature {
                creature_id: creature_id.to_owned(),
            })?;

        if let Some(max_hp) = options.max_hp {
            stats.max_hp = max_hp;
        }
        if let Some(armor_class) = options.armor_class {
            stats.armor_class = armor_class;
        }

        let id = self.next_id();
        let name = options.name.unwrap_or_else(|| self.instance_name(&stats.name));

        let mut combatant = Combatant::new(id, name, side, stats);
        if let Some(hp) = options.hp {
            combatant = combatant.with_hp(hp);
        }
        if options.heals > 0 {
            let dice = options.heal_dice.unwrap_or(GameConfig::DEFAULT_HEAL_DICE);
            combatant = combatant.with_heals(options.heals, dice);
        }
        for condition in options.conditions {
            combatant = combatant.with_condition(condition);
        }

        self.combatants.push(combatant);
        Ok(id)
    }

    pub fn max_rounds(&mut self, max_rounds: u32) -> &mut Self {
        self.config = GameConfig::with_max_rounds(max_rounds);
        self
    }

    pub fn config(&mut self, config: GameConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    /// Validates the roster and creates the engine in `Setup`.
    ///
    /// `dice` must be fresh: its seed becomes the encounter seed and nothing
    /// may have been drawn from it yet.
    pub fn build(&self, dice: &Dice) -> Result<CombatEngine, SetupError> {
        if dice.draws() > 0 {
            return Err(SetupError::SeedConsumed {
                draws: dice.draws(),
            });
        }
        self.validate()?;

        let state = BattleState::new(dice.seed(), self.combatants.clone());
        Ok(CombatEngine::new(state, self.config.clone()))
    }

    fn validate(&self) -> Result<(), SetupError> {
        if self.combatants.is_empty() {
            return Err(SetupError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for combatant in &self.combatants {
            if !seen.insert(combatant.id) {
                return Err(SetupError::DuplicateId { id: combatant.id });
            }
            if combatant.stats.attacks.is_empty() {
                return Err(SetupError::NoAttacks { id: combatant.id });
            }
            if combatant.max_hp() == 0 {
                return Err(SetupError::InvalidStats {
                    id: combatant.id,
                    reason: "max HP must be positive",
                });
            }
            let faceless = |dice: &DiceExpr| dice.count > 0 && dice.sides == 0;
            if combatant.stats.attacks.iter().any(|a| faceless(&a.damage))
                || faceless(&combatant.heal_dice())
            {
                return Err(SetupError::InvalidStats {
                    id: combatant.id,
                    reason: "damage dice need at least one side",
                });
            }
        }

        let both_sides = Side::ALL.iter().all(|&side| {
            self.combatants
                .iter()
                .any(|c| c.side == side && c.is_alive())
        });
        if !both_sides {
            return Err(SetupError::SingleSide);
        }

        Ok(())
    }

    fn next_id(&self) -> CombatantId {
        let next = self
            .combatants
            .iter()
            .map(|c| c.id.0 + 1)
            .max()
            .unwrap_or(1);
        CombatantId(next)
    }

    fn instance_name(&self, base: &str) -> String {
        let existing = self
            .combatants
            .iter()
            .filter(|c| c.stats.name == base)
            .count();
        if existing == 0 {
            base.to_owned()
        } else {
            format!("{base} {}", existing + 1)
        }
    }
}
