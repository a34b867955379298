//! Action provider implementations for each kind of combatant control.

pub mod human;
pub mod planner;
pub mod scripted;

pub use human::{ChoiceRejection, ChoiceRequest, HumanProvider, parse_choice};
pub use planner::{PlannerConfig, PlannerProvider};
pub use scripted::{ScriptedProvider, TieBreak};
