//! Static creature definitions and the oracle interface used to look them up.
//!
//! Creature data is read-only reference material: an encounter copies the
//! statistics it needs into each [`crate::state::Combatant`] at setup and
//! never consults the oracle again.

use super::dice::DiceExpr;

/// 5e-style ability modifier: `floor((score - 10) / 2)`.
pub const fn ability_mod(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// The six ability scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub const fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// Dexterity modifier, used as the initiative modifier.
    pub const fn dex_mod(&self) -> i32 {
        ability_mod(self.dexterity)
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// One weapon or natural attack a creature can make.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    pub name: String,
    pub attack_bonus: i32,
    pub damage: DiceExpr,
    pub damage_type: String,
}

impl AttackProfile {
    pub fn new(
        name: impl Into<String>,
        attack_bonus: i32,
        damage: DiceExpr,
        damage_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attack_bonus,
            damage,
            damage_type: damage_type.into(),
        }
    }
}

/// Static statistics for a creature kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureStats {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: AbilityScores,
    pub max_hp: u32,
    pub armor_class: i32,
    /// Attacks in preference order; the basic attack uses the first entry.
    pub attacks: Vec<AttackProfile>,
}

impl CreatureStats {
    /// Initiative modifier derived from dexterity.
    pub fn initiative_modifier(&self) -> i32 {
        self.abilities.dex_mod()
    }
}

/// Read-only creature lookup keyed by a stable creature identifier
/// (e.g., `"goblin"`).
///
/// Implementations live outside the core (content catalogs, test fixtures).
/// An unknown identifier yields `None`; the encounter builder turns that into
/// a setup error instead of substituting a default creature.
pub trait CreatureOracle: Send + Sync {
    /// Returns the statistics for `id`, if the creature exists.
    fn creature(&self, id: &str) -> Option<CreatureStats>;

    /// Identifiers known to this oracle, in a stable order.
    fn creature_ids(&self) -> Vec<String> {
        Vec::new()
    }
}
