//! Seeded dice stream for deterministic random number generation.
//!
//! Every roll in an encounter (initiative, attack rolls, damage, heals and
//! scripted tie-breaks) is drawn from a single [`Dice`] stream that is seeded
//! once before the first roll. Draws are consumed strictly in call order, so
//! two runs with the same seed and the same sequence of calls observe the same
//! values.
//!
//! # Draw order
//!
//! - [`Dice::roll_die`] consumes exactly one draw.
//! - [`Dice::roll_dice`] consumes exactly `count` draws, die 1 first.
//! - [`Dice::roll_d20`] consumes one draw (normal) or two (advantage and
//!   disadvantage), first die first.
//! - [`Dice::roll_expr`] consumes the expression's dice in order; the flat
//!   modifier consumes nothing.

use super::dice::{DiceExpr, RollMode, RollResult};
use crate::config::GameConfig;

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn output(state: u64) -> u32 {
        // XOR upper bits with lower bits, shift right
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;

        // Use upper bits to determine rotation amount
        let rot = (state >> 59) as u32;

        xorshifted.rotate_right(rot)
    }

    /// Spread a user-supplied seed over the whole state word so that small
    /// seeds (0, 1, 42) do not start in correlated states.
    fn scramble(seed: u64) -> u64 {
        // SplitMix64-style finalizer
        let mut hash = seed ^ 0x9e3779b97f4a7c15;
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
        hash ^= hash >> 33;
        hash
    }
}

/// Outcome of a d20 test, keeping every die that was thrown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct D20Roll {
    pub mode: RollMode,
    /// Dice in draw order (one for normal rolls, two otherwise).
    pub rolls: Vec<u32>,
    /// The die that counts.
    pub natural: u32,
}

/// The single source of randomness for an encounter.
///
/// Cloning a `Dice` forks the stream: both copies continue with identical
/// values. Only do this for previews, never for rolls that reach the log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dice {
    seed: u64,
    state: u64,
    draws: u64,
}

impl Dice {
    /// Creates a stream seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            state: PcgRng::scramble(seed),
            draws: 0,
        }
    }

    /// The seed this stream was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of dice drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = PcgRng::step(self.state);
        self.draws += 1;
        PcgRng::output(self.state)
    }

    /// Roll a die with `sides` faces (1..=sides inclusive).
    ///
    /// # Panics
    ///
    /// Panics if `sides` is zero. A zero-sided die is a programming error,
    /// not a recoverable condition.
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        assert!(sides >= 1, "a die needs at least one side (got {sides})");
        // Multiply-shift maps the 32-bit draw onto [0, sides) with one draw.
        let scaled = (u64::from(self.next_u32()) * u64::from(sides)) >> 32;
        scaled as u32 + 1
    }

    /// Roll `count` dice with `sides` faces each and sum them.
    ///
    /// Consumes exactly `count` draws, die 1 first.
    ///
    /// # Panics
    ///
    /// Panics if `count > 0` and `sides` is zero.
    pub fn roll_dice(&mut self, count: u32, sides: u32) -> RollResult {
        let rolls: Vec<u32> = (0..count).map(|_| self.roll_die(sides)).collect();
        RollResult::new(rolls, 0)
    }

    /// Roll a d20 test with the given advantage state.
    pub fn roll_d20(&mut self, mode: RollMode) -> D20Roll {
        match mode {
            RollMode::Normal => {
                let natural = self.roll_die(GameConfig::ATTACK_DIE);
                D20Roll {
                    mode,
                    rolls: vec![natural],
                    natural,
                }
            }
            RollMode::Advantage | RollMode::Disadvantage => {
                let first = self.roll_die(GameConfig::ATTACK_DIE);
                let second = self.roll_die(GameConfig::ATTACK_DIE);
                let natural = if mode == RollMode::Advantage {
                    first.max(second)
                } else {
                    first.min(second)
                };
                D20Roll {
                    mode,
                    rolls: vec![first, second],
                    natural,
                }
            }
        }
    }

    /// Roll a parsed dice expression such as `2d6+3`.
    pub fn roll_expr(&mut self, expr: &DiceExpr) -> RollResult {
        let mut result = self.roll_dice(expr.count, expr.sides);
        result.modifier = expr.modifier;
        result.total += i64::from(expr.modifier);
        result
    }
}
