//! Content loaders for reading game data from files.
//!
//! Creature catalogs are RON maps from creature id to stat block; rules are
//! a TOML rendering of [`game_core::GameConfig`].

pub mod config;
pub mod creatures;

pub use config::ConfigLoader;
pub use creatures::CreatureLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
