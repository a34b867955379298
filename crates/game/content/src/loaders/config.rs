//! Encounter rules loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter rules from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rules from a TOML file containing a [`GameConfig`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse rules from TOML text. `max_rounds` is clamped to at least one.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        Ok(GameConfig::with_max_rounds(config.max_rounds))
    }

    /// The bundled default rules.
    pub fn builtin() -> LoadResult<GameConfig> {
        Self::parse(include_str!("../../data/rules.toml"))
    }
}
