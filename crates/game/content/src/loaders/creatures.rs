//! Creature catalog loader.
//!
//! RON format: a map from creature id to [`CreatureStats`].
//!
//! ```ron
//! {
//!     "goblin": (
//!         name: "Goblin",
//!         abilities: (strength: 8, dexterity: 14, ...),
//!         max_hp: 7,
//!         armor_class: 15,
//!         attacks: [(name: "Scimitar", attack_bonus: 4, damage: "1d6+2", damage_type: "slashing")],
//!     ),
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use game_core::CreatureStats;

use crate::loaders::{LoadResult, read_file};

/// Loader for creature catalogs from RON files.
pub struct CreatureLoader;

impl CreatureLoader {
    /// Load a creature catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, CreatureStats>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid creature catalog {}: {}", path.display(), e))
    }

    /// Parse and validate a catalog from RON text.
    ///
    /// Stat blocks the engine could not use are rejected here rather than
    /// when an encounter is assembled.
    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, CreatureStats>> {
        let creatures: BTreeMap<String, CreatureStats> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse creature catalog RON: {}", e))?;

        for (id, stats) in &creatures {
            if stats.attacks.is_empty() {
                anyhow::bail!("Creature '{}' ({}) has no usable attacks", id, stats.name);
            }
            if stats.max_hp == 0 {
                anyhow::bail!("Creature '{}' ({}) has no hit points", id, stats.name);
            }
        }

        Ok(creatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "rat": (
            name: "Rat",
            abilities: (strength: 2, dexterity: 11, constitution: 9, intelligence: 2, wisdom: 10, charisma: 4),
            max_hp: 1,
            armor_class: 10,
            attacks: [(name: "Bite", attack_bonus: 0, damage: "1", damage_type: "piercing")],
        ),
    }"#;

    #[test]
    fn rejects_bad_dice_notation() {
        let err = CreatureLoader::parse(SAMPLE).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn parses_and_defaults_abilities() {
        let ron = r#"{
            "rat": (
                name: "Rat",
                max_hp: 1,
                armor_class: 10,
                attacks: [(name: "Bite", attack_bonus: 0, damage: "1d1", damage_type: "piercing")],
            ),
        }"#;
        let creatures = CreatureLoader::parse(ron).unwrap();
        let rat = &creatures["rat"];
        assert_eq!(rat.abilities.dexterity, 10);
        assert_eq!(rat.attacks[0].damage.to_string(), "1d1");
    }

    #[test]
    fn rejects_creatures_without_attacks() {
        let ron = r#"{ "statue": (name: "Statue", max_hp: 10, armor_class: 17, attacks: []) }"#;
        let err = CreatureLoader::parse(ron).unwrap_err();
        assert!(err.to_string().contains("no usable attacks"));
    }
}
