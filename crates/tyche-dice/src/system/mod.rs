//! Dice systems: one notation, engine and renderer per tabletop family.
//!
//! Every system follows the same three steps. [`DiceSystem::parse`] turns a
//! text prefix into a roll spec or rejects it, [`DiceSystem::roll`] draws
//! faces for that spec, and [`DiceSystem::render`] formats the faces. Only
//! `roll` consumes randomness.

pub mod apocalypse;
pub mod generic;
pub mod wod;

pub use apocalypse::{Apocalypse, MoveRoll};
pub use generic::{Generic, GenericRoll};
pub use wod::{PoolRoll, WorldOfDarkness};

use std::str::FromStr;

use regex::Captures;
use serde::{Deserialize, Serialize};

use crate::dispatch::Rolled;
use crate::error::{ParseError, ParseResult};
use crate::source::DieSource;

/// Largest dice count a notation accepts unless configured otherwise.
pub const DEFAULT_MAX_DICE: u32 = 1000;

/// The shared parse/roll/render contract.
pub trait DiceSystem {
    /// The resolved request this system rolls.
    type Spec: Clone + PartialEq + std::fmt::Debug + Into<RollSpec>;

    /// Which family this system implements.
    fn kind(&self) -> SystemKind;

    /// Recognize a prefix of `input`.
    fn parse(&self, input: &str) -> ParseResult<Self::Spec>;

    /// Draw the raw faces for `spec`.
    fn roll<D: DieSource + ?Sized>(&self, spec: &Self::Spec, dice: &mut D) -> Vec<u32>;

    /// Format raw faces. Must accept an empty slice.
    fn render(&self, faces: &[u32], spec: &Self::Spec) -> String;

    /// Parse, roll and render in one go.
    fn evaluate<D: DieSource + ?Sized>(&self, input: &str, dice: &mut D) -> ParseResult<Rolled> {
        let spec = self.parse(input)?;
        let faces = self.roll(&spec, dice);
        let text = self.render(&faces, &spec);
        Ok(Rolled {
            system: self.kind(),
            spec: spec.into(),
            faces,
            text,
        })
    }
}

/// The closed set of supported notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemKind {
    /// `XdY+Z` sums.
    #[serde(rename = "generic")]
    Generic,
    /// `X`, `XeY`, `XeYr` d10 pools.
    #[serde(rename = "wod", alias = "world-of-darkness", alias = "cofd")]
    WorldOfDarkness,
    /// `+X` / `-X` 2d6 moves.
    #[serde(rename = "pbta", alias = "apocalypse")]
    Apocalypse,
}

impl SystemKind {
    /// All systems in their default dispatch order.
    pub const ALL: [SystemKind; 3] = [Self::Generic, Self::WorldOfDarkness, Self::Apocalypse];

    /// Human-readable name.
    pub fn title(self) -> &'static str {
        match self {
            Self::Generic => "Generic dice roller",
            Self::WorldOfDarkness => "Chronicles of Darkness roller",
            Self::Apocalypse => "Powered by the Apocalypse roller",
        }
    }

    /// Notation summary, optional parts in parentheses.
    pub fn notation(self) -> &'static str {
        match self {
            Self::Generic => "XdY(+/-Z)",
            Self::WorldOfDarkness => "X(eY)(r)",
            Self::Apocalypse => "+/-X",
        }
    }

    /// A sample input.
    pub fn example(self) -> &'static str {
        match self {
            Self::Generic => "2d6+1",
            Self::WorldOfDarkness => "5e8r",
            Self::Apocalypse => "+2",
        }
    }
}

impl std::fmt::Display for SystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::WorldOfDarkness => write!(f, "wod"),
            Self::Apocalypse => write!(f, "pbta"),
        }
    }
}

/// A system name that matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dice system {0:?} (expected generic, wod or pbta)")]
pub struct UnknownSystem(pub String);

impl FromStr for SystemKind {
    type Err = UnknownSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "wod" | "world-of-darkness" | "cofd" => Ok(Self::WorldOfDarkness),
            "pbta" | "apocalypse" => Ok(Self::Apocalypse),
            _ => Err(UnknownSystem(s.to_string())),
        }
    }
}

/// A resolved request from any system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollSpec {
    /// Resolved by [`Generic`].
    Generic(GenericRoll),
    /// Resolved by [`WorldOfDarkness`].
    Pool(PoolRoll),
    /// Resolved by [`Apocalypse`].
    Move(MoveRoll),
}

impl RollSpec {
    /// Number of dice rolled before any rerolls or explosions.
    pub fn count(&self) -> u32 {
        match self {
            Self::Generic(g) => g.count,
            Self::Pool(p) => p.count,
            Self::Move(_) => MoveRoll::COUNT,
        }
    }

    /// Sides on each die.
    pub fn sides(&self) -> u32 {
        match self {
            Self::Generic(g) => g.sides,
            Self::Pool(_) => PoolRoll::SIDES,
            Self::Move(_) => MoveRoll::SIDES,
        }
    }
}

impl From<GenericRoll> for RollSpec {
    fn from(spec: GenericRoll) -> Self {
        Self::Generic(spec)
    }
}

impl From<PoolRoll> for RollSpec {
    fn from(spec: PoolRoll) -> Self {
        Self::Pool(spec)
    }
}

impl From<MoveRoll> for RollSpec {
    fn from(spec: MoveRoll) -> Self {
        Self::Move(spec)
    }
}

/// Convert capture group `index` to a number, if it participated.
fn capture<T: FromStr>(
    caps: &Captures<'_>,
    index: usize,
    field: &'static str,
) -> ParseResult<Option<T>> {
    caps.get(index)
        .map(|m| {
            m.as_str().parse::<T>().map_err(|_| ParseError::InvalidNumber {
                field,
                value: m.as_str().to_string(),
            })
        })
        .transpose()
}

/// Reject counts above `max`.
fn check_count(count: u32, max: u32) -> ParseResult<u32> {
    if count > max {
        Err(ParseError::TooManyDice { count, max })
    } else {
        Ok(count)
    }
}

/// Apply a `+`/`-` sign capture to a magnitude.
fn signed(sign: Option<&str>, magnitude: i64) -> i64 {
    if sign == Some("-") {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedDice;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in SystemKind::ALL {
            assert_eq!(kind.to_string().parse::<SystemKind>(), Ok(kind));
        }
        assert_eq!("CofD".parse::<SystemKind>(), Ok(SystemKind::WorldOfDarkness));
        assert!("d&d".parse::<SystemKind>().is_err());
    }

    #[test]
    fn default_order() {
        assert_eq!(
            SystemKind::ALL,
            [
                SystemKind::Generic,
                SystemKind::WorldOfDarkness,
                SystemKind::Apocalypse
            ]
        );
    }

    #[test]
    fn examples_parse_with_their_own_system() {
        assert!(Generic::default().parse(SystemKind::Generic.example()).is_ok());
        assert!(
            WorldOfDarkness::default()
                .parse(SystemKind::WorldOfDarkness.example())
                .is_ok()
        );
        assert!(Apocalypse.parse(SystemKind::Apocalypse.example()).is_ok());
    }

    #[test]
    fn evaluate_runs_all_three_steps() {
        let mut dice = ScriptedDice::new([2, 5]);
        let rolled = Generic::default().evaluate("2d6+1", &mut dice).unwrap();
        assert_eq!(rolled.system, SystemKind::Generic);
        assert_eq!(rolled.faces, vec![2, 5]);
        assert_eq!(rolled.text, "2, 5 [+1] (total 8)");
        assert_eq!(rolled.spec.count(), 2);
        assert_eq!(rolled.spec.sides(), 6);
    }

    #[test]
    fn numeric_overflow_is_a_parse_error() {
        let err = Generic::default().parse("99999999999d6").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "count", .. }));
    }
}
