//! Text presentation of the encounter.

mod narrator;
mod prompt;

pub use narrator::Narrator;
pub use prompt::write_prompt;
