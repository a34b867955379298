//! Data-driven creature content and loaders.
//!
//! This crate houses the static creature data the encounter builder looks up:
//! - Creature catalogs (data-driven via RON), exposed as a [`CreatureOracle`]
//! - Encounter rules (data-driven via TOML)
//!
//! Content is consulted at setup only and never appears in battle state.
//!
//! [`CreatureOracle`]: game_core::CreatureOracle

#[cfg(feature = "loaders")]
pub mod catalog;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use catalog::CreatureCatalog;
#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, CreatureLoader, LoadResult};
