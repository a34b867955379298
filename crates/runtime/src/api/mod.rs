//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the providers and the encounter runner can stay focused on orchestration.

pub mod errors;
pub mod providers;
pub mod registry;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{ActionProvider, ActionRequest, PassActionProvider};
pub use registry::ProviderRegistry;
