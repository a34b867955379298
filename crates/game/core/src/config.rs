use crate::env::DiceExpr;

/// Encounter rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Last round that may start. Reaching the limit ends the encounter
    /// without a winner.
    pub max_rounds: u32,
}

impl GameConfig {
    // ===== fixed rule constants =====
    /// Die rolled for initiative.
    pub const INITIATIVE_DIE: u32 = 20;
    /// Die rolled for attack rolls.
    pub const ATTACK_DIE: u32 = 20;
    /// Natural attack roll that always hits and doubles damage dice.
    pub const CRITICAL_ROLL: u32 = 20;
    /// Heal expression used when a combatant has charges but no explicit dice.
    pub const DEFAULT_HEAL_DICE: DiceExpr = DiceExpr {
        count: 1,
        sides: 8,
        modifier: 2,
    };
    /// Scripted combatants heal at or below this fraction of max HP (1/N).
    pub const LOW_HP_DIVISOR: u32 = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ROUNDS: u32 = 50;

    pub fn new() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_max_rounds(max_rounds: u32) -> Self {
        Self {
            max_rounds: max_rounds.max(1),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
