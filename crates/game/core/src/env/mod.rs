//! Inputs the rules consume but never own.
//!
//! - [`rng`]: the seeded [`Dice`] stream, the only randomness channel
//! - [`dice`]: dice notation and roll records
//! - [`creatures`]: static creature statistics and the [`CreatureOracle`] lookup
mod creatures;
mod dice;
mod rng;

pub use creatures::{AbilityScores, AttackProfile, CreatureOracle, CreatureStats, ability_mod};
pub use dice::{DiceError, DiceExpr, RollMode, RollResult};
pub use rng::{D20Roll, Dice, PcgRng};
