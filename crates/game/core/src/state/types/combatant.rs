//! Combatant model: identity, static statistics and mutable battle state.
//!
//! Mutators are crate-private. Outside code observes combatants through
//! shared references and learns about changes from the event log.

use bitflags::bitflags;

use super::common::{CombatantId, Side};
use crate::config::GameConfig;
use crate::env::{CreatureStats, DiceExpr};

bitflags! {
    /// Active conditions on a combatant.
    ///
    /// Iteration follows declaration order, which keeps condition listings
    /// deterministic.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Conditions: u8 {
        /// Attacks against this combatant roll with disadvantage.
        const DEFENDING = 1 << 0;
        /// Cannot act except to pass.
        const STUNNED   = 1 << 1;
    }
}

/// A single condition, as reported in events.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Condition {
    Defending,
    Stunned,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::Defending, Condition::Stunned];

    pub const fn flag(self) -> Conditions {
        match self {
            Condition::Defending => Conditions::DEFENDING,
            Condition::Stunned => Conditions::STUNNED,
        }
    }
}

impl Conditions {
    /// Active conditions in declaration order.
    pub fn list(self) -> impl Iterator<Item = Condition> {
        Condition::ALL
            .into_iter()
            .filter(move |condition| self.contains(condition.flag()))
    }
}

/// One participant in an encounter.
///
/// # Invariants
///
/// - `hp <= stats.max_hp`
/// - `hp == 0` implies the combatant is defeated
/// - once defeated, a combatant stays defeated for the rest of the encounter
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    /// Display name of this instance (e.g. "Goblin 2").
    pub name: String,
    pub side: Side,
    pub stats: CreatureStats,
    hp: u32,
    defeated: bool,
    conditions: Conditions,
    initiative: Option<i32>,
    heals_remaining: u32,
    heal_dice: DiceExpr,
}

impl Combatant {
    /// Creates a combatant at full health with no conditions.
    pub fn new(id: CombatantId, name: impl Into<String>, side: Side, stats: CreatureStats) -> Self {
        let hp = stats.max_hp;
        Self {
            id,
            name: name.into(),
            side,
            stats,
            hp,
            defeated: hp == 0,
            conditions: Conditions::empty(),
            initiative: None,
            heals_remaining: 0,
            heal_dice: GameConfig::DEFAULT_HEAL_DICE,
        }
    }

    /// Starts the combatant wounded. Values above max HP are clamped.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.stats.max_hp);
        self.defeated = self.hp == 0;
        self
    }

    /// Grants heal charges rolled with `dice`.
    pub fn with_heals(mut self, charges: u32, dice: DiceExpr) -> Self {
        self.heals_remaining = charges;
        self.heal_dice = dice;
        self
    }

    /// Starts the combatant with a condition already applied.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.insert(condition.flag());
        self
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn armor_class(&self) -> i32 {
        self.stats.armor_class
    }

    pub fn is_alive(&self) -> bool {
        !self.defeated
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn conditions(&self) -> Conditions {
        self.conditions
    }

    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(condition.flag())
    }

    /// Initiative total, once rolled.
    pub fn initiative(&self) -> Option<i32> {
        self.initiative
    }

    pub fn initiative_modifier(&self) -> i32 {
        self.stats.initiative_modifier()
    }

    pub fn heals_remaining(&self) -> u32 {
        self.heals_remaining
    }

    pub fn heal_dice(&self) -> DiceExpr {
        self.heal_dice
    }

    /// True when another heal would restore something and a charge is left.
    pub fn can_heal(&self) -> bool {
        self.is_alive() && self.heals_remaining > 0 && self.hp < self.stats.max_hp
    }

    /// Whether `other` fights on the opposing side.
    pub fn is_hostile_to(&self, other: &Combatant) -> bool {
        self.side != other.side
    }

    /// Removes up to `amount` HP, flooring at zero. Returns the new HP.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.defeated = true;
        }
        self.hp
    }

    /// Restores up to `amount` HP, capped at max HP. Defeated combatants stay down.
    pub(crate) fn restore(&mut self, amount: u32) -> u32 {
        if !self.defeated {
            self.hp = self.hp.saturating_add(amount).min(self.stats.max_hp);
        }
        self.hp
    }

    pub(crate) fn spend_heal_charge(&mut self) -> u32 {
        self.heals_remaining = self.heals_remaining.saturating_sub(1);
        self.heals_remaining
    }

    /// Returns true if the condition was not already present.
    pub(crate) fn add_condition(&mut self, condition: Condition) -> bool {
        let added = !self.conditions.contains(condition.flag());
        self.conditions.insert(condition.flag());
        added
    }

    /// Returns true if the condition was present.
    pub(crate) fn remove_condition(&mut self, condition: Condition) -> bool {
        let removed = self.conditions.contains(condition.flag());
        self.conditions.remove(condition.flag());
        removed
    }

    pub(crate) fn set_initiative(&mut self, total: i32) {
        self.initiative = Some(total);
    }
}
