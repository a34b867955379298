//! Action resolution.
//!
//! Pure functions mapping (state, action, dice) to an [`Outcome`]. The
//! resolver reads the battle state but never mutates it; the engine applies
//! the outcome and turns it into events.
//!
//! # Core Functions
//!
//! - `resolve`: validate, then resolve any action kind
//! - `roll_attack`: d20 + bonus against armor class, with advantage state
//! - `roll_damage`: damage dice, doubled on a critical
//! - `apply_damage`: HP reduction floored at zero

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{apply_damage, roll_damage};
pub use hit::{attack_mode, check_hit, roll_attack};
pub use result::{AttackOutcome, AttackRoll, DamageRoll, HealOutcome, Outcome, resolve};
