//! Roster description for assembling an encounter.
//!
//! A scenario names creatures by catalog id and says who controls them. Ids
//! are allocated when the scenario is assembled, in placement order.

use serde::{Deserialize, Serialize};

use game_core::{CreatureOracle, EncounterBuilder, GameConfig, Side, SpawnOptions};

use crate::api::{ProviderKind, ProviderRegistry, Result};

/// One combatant to spawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Catalog id, e.g. `"goblin"`.
    pub creature: String,
    pub side: Side,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub heals: u32,
    /// Provider binding; unbound combatants use the registry default.
    #[serde(default)]
    pub control: Option<ProviderKind>,
}

impl Placement {
    pub fn new(creature: impl Into<String>, side: Side) -> Self {
        Self {
            creature: creature.into(),
            side,
            name: None,
            heals: 0,
            control: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_heals(mut self, heals: u32) -> Self {
        self.heals = heals;
        self
    }

    pub fn controlled_by(mut self, kind: ProviderKind) -> Self {
        self.control = Some(kind);
        self
    }

    fn spawn_options(&self) -> SpawnOptions {
        let mut options = SpawnOptions::new().with_heals(self.heals);
        if let Some(name) = &self.name {
            options = options.named(name.clone());
        }
        options
    }
}

/// Ordered roster of placements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub placements: Vec<Placement>,
}

impl Scenario {
    pub fn new(placements: Vec<Placement>) -> Self {
        Self { placements }
    }

    /// One hero against a list of monsters.
    pub fn skirmish<I, S>(hero: Placement, monsters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut placements = vec![hero];
        placements.extend(
            monsters
                .into_iter()
                .map(|id| Placement::new(id, Side::Enemies).controlled_by(ProviderKind::Scripted)),
        );
        Self { placements }
    }

    pub fn push(&mut self, placement: Placement) -> &mut Self {
        self.placements.push(placement);
        self
    }

    /// Hands every placement on `side` to `kind`.
    pub fn control_side(&mut self, side: Side, kind: ProviderKind) -> &mut Self {
        for placement in self.placements.iter_mut().filter(|p| p.side == side) {
            placement.control = Some(kind);
        }
        self
    }

    /// Spawns every placement and binds its provider.
    ///
    /// # Errors
    ///
    /// Any [`game_core::SetupError`] from spawning, e.g. an unknown creature id.
    pub fn assemble(
        &self,
        oracle: &dyn CreatureOracle,
        config: GameConfig,
        providers: &mut ProviderRegistry,
    ) -> Result<EncounterBuilder> {
        let mut builder = EncounterBuilder::new();
        builder.config(config);

        for placement in &self.placements {
            let id = builder.spawn(
                oracle,
                &placement.creature,
                placement.side,
                placement.spawn_options(),
            )?;
            if let Some(kind) = placement.control {
                providers.bind(id, kind);
            }
            tracing::debug!(
                target: "runtime::scenario",
                id = %id,
                creature = %placement.creature,
                side = %placement.side,
                "spawned"
            );
        }

        Ok(builder)
    }
}
