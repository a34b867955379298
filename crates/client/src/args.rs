//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use runtime::TieBreak;

/// Monsters fielded when none are named.
pub const DEFAULT_MONSTERS: [&str; 2] = ["goblin", "goblin"];

#[derive(Debug, Clone, Parser)]
#[command(name = "skirmish", version, about = "Turn-based tactical combat in the terminal")]
pub struct Args {
    /// Dice seed; the same seed and choices replay the same fight
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extra creature catalog (RON), merged over the built-in bestiary
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Rules file (TOML), e.g. `max_rounds = 20`
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Creature id for the player character
    #[arg(long, value_name = "ID", default_value = "hero")]
    pub hero: String,

    /// Creature id of an opponent; repeat for more
    #[arg(long = "monster", value_name = "ID")]
    pub monsters: Vec<String>,

    /// Round limit; the fight ends without a winner after it
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<u32>,

    /// Heal charges for the hero
    #[arg(long, value_name = "N", default_value_t = 2)]
    pub heals: u32,

    /// Let the scripted policy play the hero too
    #[arg(long)]
    pub auto: bool,

    /// Break scripted targeting ties with a die roll instead of list order
    #[arg(long)]
    pub roll_ties: bool,

    /// Let the lookahead planner command the monsters
    #[arg(long)]
    pub planner: bool,

    /// Write the seed, outcome and full event log as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl Args {
    pub fn monsters(&self) -> Vec<String> {
        if self.monsters.is_empty() {
            DEFAULT_MONSTERS.iter().map(|id| (*id).to_owned()).collect()
        } else {
            self.monsters.clone()
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        if self.roll_ties {
            TieBreak::Roll
        } else {
            TieBreak::FirstListed
        }
    }
}
