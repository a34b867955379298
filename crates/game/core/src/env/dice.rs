//! Dice notation (`NdS±K`) and roll records.

use core::fmt;
use core::str::FromStr;

/// Errors produced when parsing dice notation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("invalid dice notation {notation:?}: {reason}")]
    InvalidNotation {
        notation: String,
        reason: &'static str,
    },
}

impl DiceError {
    fn invalid(notation: &str, reason: &'static str) -> Self {
        Self::InvalidNotation {
            notation: notation.to_owned(),
            reason,
        }
    }
}

impl crate::error::GameError for DiceError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "DICE_INVALID_NOTATION"
    }
}

/// Parsed dice expression like `2d6+3`, `d20` or `4d8-2`.
///
/// `0dS+K` is accepted and always totals `K`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceExpr {
    /// Creates an expression, rejecting dice without faces.
    pub fn new(count: u32, sides: u32, modifier: i32) -> Result<Self, DiceError> {
        if count > 0 && sides == 0 {
            return Err(DiceError::invalid(
                &format!("{count}d{sides}"),
                "dice need at least one side",
            ));
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Parses notation such as `"2d6+3"`. Whitespace and the case of `d` are ignored.
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let compact: String = notation
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        let (count_part, rest) = compact
            .split_once('d')
            .ok_or_else(|| DiceError::invalid(notation, "missing 'd' separator"))?;

        let count = if count_part.is_empty() {
            1
        } else {
            parse_digits(count_part).ok_or_else(|| DiceError::invalid(notation, "bad dice count"))?
        };

        let sign_at = rest.find(['+', '-']);
        let (sides_part, modifier) = match sign_at {
            Some(index) => {
                let (sides, signed) = rest.split_at(index);
                let magnitude = parse_digits(&signed[1..])
                    .ok_or_else(|| DiceError::invalid(notation, "bad modifier"))?;
                let magnitude = i32::try_from(magnitude)
                    .map_err(|_| DiceError::invalid(notation, "modifier out of range"))?;
                let modifier = if signed.starts_with('-') {
                    -magnitude
                } else {
                    magnitude
                };
                (sides, modifier)
            }
            None => (rest, 0),
        };

        let sides =
            parse_digits(sides_part).ok_or_else(|| DiceError::invalid(notation, "bad die size"))?;

        if count > 0 && sides == 0 {
            return Err(DiceError::invalid(notation, "dice need at least one side"));
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceExpr {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DiceExpr> for String {
    fn from(expr: DiceExpr) -> Self {
        expr.to_string()
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Advantage state for a d20 test.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RollMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

/// Individual dice plus the flat modifier, kept for auditing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    /// Dice in draw order.
    pub rolls: Vec<u32>,
    pub modifier: i32,
    /// Sum of the dice plus the modifier (may be negative).
    pub total: i64,
}

impl RollResult {
    pub fn new(rolls: Vec<u32>, modifier: i32) -> Self {
        let total = rolls.iter().map(|&r| i64::from(r)).sum::<i64>() + i64::from(modifier);
        Self {
            rolls,
            modifier,
            total,
        }
    }

    /// Total clamped to a non-negative amount (damage and healing never invert).
    pub fn amount(&self) -> u32 {
        u32::try_from(self.total.max(0)).unwrap_or(u32::MAX)
    }

    /// Merges a second roll of the same expression (critical hits).
    pub fn combine(mut self, other: RollResult) -> Self {
        self.rolls.extend(other.rolls);
        self.modifier += other.modifier;
        self.total += other.total;
        self
    }
}
