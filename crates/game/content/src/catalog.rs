//! In-memory creature catalog.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{CreatureOracle, CreatureStats};

use crate::loaders::{CreatureLoader, LoadResult};

/// Creature stat blocks keyed by creature id.
///
/// Implements [`CreatureOracle`], so it can be handed straight to
/// [`game_core::EncounterBuilder::spawn`].
#[derive(Clone, Debug, Default)]
pub struct CreatureCatalog {
    creatures: BTreeMap<String, CreatureStats>,
}

impl CreatureCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bestiary bundled with the crate.
    pub fn builtin() -> LoadResult<Self> {
        Self::from_ron(include_str!("../data/creatures.ron"))
    }

    pub fn from_ron(content: &str) -> LoadResult<Self> {
        Ok(Self {
            creatures: CreatureLoader::parse(content)?,
        })
    }

    pub fn load(path: &Path) -> LoadResult<Self> {
        Ok(Self {
            creatures: CreatureLoader::load(path)?,
        })
    }

    /// Adds or replaces entries from `other`.
    pub fn extend(&mut self, other: CreatureCatalog) {
        self.creatures.extend(other.creatures);
    }

    pub fn insert(&mut self, id: impl Into<String>, stats: CreatureStats) {
        self.creatures.insert(id.into(), stats);
    }

    pub fn get(&self, id: &str) -> Option<&CreatureStats> {
        self.creatures.get(id)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}

impl CreatureOracle for CreatureCatalog {
    fn creature(&self, id: &str) -> Option<CreatureStats> {
        self.creatures.get(id).cloned()
    }

    fn creature_ids(&self) -> Vec<String> {
        self.creatures.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Dice, EncounterBuilder, SetupError, Side, SpawnOptions};

    #[test]
    fn builtin_bestiary_loads() {
        let catalog = CreatureCatalog::builtin().unwrap();
        let goblin = catalog.get("goblin").unwrap();

        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.armor_class, 15);
        assert_eq!(goblin.max_hp, 7);
        assert_eq!(goblin.initiative_modifier(), 2);
        assert_eq!(goblin.attacks[0].damage.to_string(), "1d6+2");
        assert!(catalog.creature_ids().contains(&"hero".to_owned()));
    }

    #[test]
    fn creature_ids_are_sorted() {
        let catalog = CreatureCatalog::builtin().unwrap();
        let ids = catalog.creature_ids();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn catalog_feeds_the_encounter_builder() {
        let catalog = CreatureCatalog::builtin().unwrap();
        let mut builder = EncounterBuilder::new();
        builder
            .spawn(&catalog, "hero", Side::Players, SpawnOptions::new())
            .unwrap();
        builder
            .spawn(&catalog, "goblin", Side::Enemies, SpawnOptions::new())
            .unwrap();

        assert!(builder.build(&Dice::seeded(1)).is_ok());

        let missing = builder.spawn(&catalog, "beholder", Side::Enemies, SpawnOptions::new());
        assert!(matches!(missing, Err(SetupError::UnknownCreature { .. })));
    }

    #[test]
    fn files_extend_the_builtin_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.ron");
        std::fs::write(
            &path,
            r#"{
                "goblin": (
                    name: "Goblin Boss",
                    max_hp: 21,
                    armor_class: 17,
                    attacks: [(name: "Scimitar", attack_bonus: 4, damage: "1d6+2", damage_type: "slashing")],
                ),
            }"#,
        )
        .unwrap();

        let mut catalog = CreatureCatalog::builtin().unwrap();
        let before = catalog.len();
        catalog.extend(CreatureCatalog::load(&path).unwrap());

        assert_eq!(catalog.len(), before);
        assert_eq!(catalog.get("goblin").unwrap().name, "Goblin Boss");
    }
}
