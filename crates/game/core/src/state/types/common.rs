use std::fmt;

/// Stable identifier of a combatant within one encounter.
///
/// Ids are assigned at registration and never reused, so events can refer to
/// a combatant long after it has been defeated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which team a combatant fights for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    /// Player characters.
    Players,
    /// Monsters and other hostiles.
    Enemies,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Players, Side::Enemies];

    /// The side this one fights against.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Players => Side::Enemies,
            Side::Enemies => Side::Players,
        }
    }
}
