//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in game-core.
//! Domain-specific errors (`SetupError`, `ActionError`, `DiceError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each stage has its own error type with specific variants
//! - **Rich Context**: Errors include actor, round, and event sequence for debugging
//! - **Severity Classification**: Errors are categorized for handling strategies
//! - **No Silent Recovery**: The core never substitutes a fallback for a failed step

use crate::state::CombatantId;

/// Severity level of an error, used for categorization and handling strategies.
///
/// - **Recoverable**: The caller may retry with different input
/// - **Validation**: Invalid input that must be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The encounter cannot be created or continued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with corrected input.
    ///
    /// Examples: malformed dice notation typed by a user
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: action outside the legal set, dead target
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: submitting an action while no turn is open
    Internal,

    /// Fatal error - encounter cannot be created or continued.
    ///
    /// Examples: empty roster, unknown creature id
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Combatant that triggered the error (if applicable).
    pub actor: Option<CombatantId>,

    /// Round in progress when the error occurred.
    pub round: u32,

    /// Length of the event log at the time of the error.
    ///
    /// Every event with a lower sequence number is valid and was emitted
    /// before the failure.
    pub event_seq: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given round and log position.
    #[must_use]
    pub const fn new(round: u32, event_seq: u64) -> Self {
        Self {
            actor: None,
            round,
            event_seq,
            message: None,
        }
    }

    /// Attaches an actor to this context (builder pattern).
    #[must_use]
    pub const fn with_actor(mut self, actor: CombatantId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
