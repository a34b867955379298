use super::common::CombatantId;

/// Lifecycle phase of the combat state machine.
///
/// `Setup -> RoundStart -> TurnActive -> TurnResolved -> (RoundStart | Ended)`
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Roster registered, initiative not rolled yet.
    #[default]
    Setup,
    RoundStart,
    /// The combatant at `cursor` is taking its turn.
    TurnActive,
    TurnResolved,
    /// Terminal.
    Ended,
}

/// Round and turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Current round, starting at 1. Zero until the first round begins.
    pub round: u32,
    /// Turn order fixed at setup. Defeated combatants stay in the list and
    /// are skipped when their slot comes up.
    pub order: Vec<CombatantId>,
    /// Index into `order` of the combatant whose turn it is.
    pub cursor: usize,
    pub phase: Phase,
    /// Set while the current combatant still owes its action this turn.
    pub awaiting_action: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The combatant whose turn it is, if a turn is in progress.
    pub fn current(&self) -> Option<CombatantId> {
        match self.phase {
            Phase::TurnActive | Phase::TurnResolved => self.order.get(self.cursor).copied(),
            _ => None,
        }
    }
}
