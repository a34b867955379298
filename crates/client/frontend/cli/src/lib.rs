//! Terminal frontend for skirmish encounters.
//!
//! The frontend is a pure projection layer:
//! - it narrates events received from the runner's [`runtime::EventBus`]
//! - it answers [`runtime::ChoiceRequest`] prompts from a line-based input
//! - it never owns the runner or the engine

mod app;
mod config;
pub mod logging;
pub mod presentation;

pub use app::CliFrontend;
pub use config::CliConfig;
pub use presentation::Narrator;
