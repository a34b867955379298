//! Provider registry for managing action providers.
//!
//! Provider instances are stored by [`ProviderKind`] and shared; combatants
//! are bound to a kind, falling back to the registry default when unbound.

use std::collections::HashMap;
use std::sync::Arc;

use game_core::CombatantId;

use super::{ActionProvider, ProviderKind, Result, RuntimeError};

/// Registry for managing action providers with per-combatant bindings.
///
/// ```text
/// ProviderRegistry
/// ├── providers: HashMap<ProviderKind, Provider>
/// ├── bindings: HashMap<CombatantId, ProviderKind>
/// └── default_kind: ProviderKind
/// ```
pub struct ProviderRegistry {
    /// Shared across combatants; `Arc` so a provider can be awaited without
    /// borrowing the registry.
    providers: HashMap<ProviderKind, Arc<dyn ActionProvider>>,

    /// Sparse: only combatants that differ from the default.
    bindings: HashMap<CombatantId, ProviderKind>,

    default_kind: ProviderKind,
}

impl ProviderRegistry {
    /// Create an empty registry whose unbound combatants use scripted play.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            bindings: HashMap::new(),
            default_kind: ProviderKind::Scripted,
        }
    }

    /// Register a provider for a kind, replacing any previous one.
    pub fn register(&mut self, kind: ProviderKind, provider: impl ActionProvider + 'static) {
        self.providers.insert(kind, Arc::new(provider));
    }

    pub fn bind(&mut self, combatant: CombatantId, kind: ProviderKind) {
        self.bindings.insert(combatant, kind);
    }

    /// The explicitly bound kind, or the default.
    pub fn kind_for(&self, combatant: CombatantId) -> ProviderKind {
        self.bindings
            .get(&combatant)
            .copied()
            .unwrap_or(self.default_kind)
    }

    /// Resolve the provider for a combatant.
    ///
    /// # Errors
    ///
    /// `RuntimeError::ProviderNotSet` if the resolved kind has no instance.
    pub fn get_for(&self, combatant: CombatantId) -> Result<Arc<dyn ActionProvider>> {
        self.get(self.kind_for(combatant))
    }

    pub fn get(&self, kind: ProviderKind) -> Result<Arc<dyn ActionProvider>> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(RuntimeError::ProviderNotSet { kind })
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
