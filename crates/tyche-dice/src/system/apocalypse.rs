//! Powered by the Apocalypse moves: 2d6 plus a signed stat.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{DiceSystem, SystemKind, capture, signed};
use crate::error::{ParseError, ParseResult};
use crate::outcome::MoveOutcome;
use crate::source::DieSource;

static DICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])(\d+)").expect("valid regex"));

/// A parsed move: always 2d6, only the modifier varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRoll {
    /// The stat added to the dice.
    pub modifier: i64,
}

impl MoveRoll {
    /// Moves always roll two dice.
    pub const COUNT: u32 = 2;
    /// Moves always roll d6s.
    pub const SIDES: u32 = 6;

    /// Classify the faces plus modifier.
    pub fn outcome(&self, faces: &[u32]) -> MoveOutcome {
        let sum: i128 = faces.iter().map(|&f| i128::from(f)).sum();
        MoveOutcome::classify(sum + i128::from(self.modifier))
    }
}

/// The Powered by the Apocalypse move roller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Apocalypse;

impl DiceSystem for Apocalypse {
    type Spec = MoveRoll;

    fn kind(&self) -> SystemKind {
        SystemKind::Apocalypse
    }

    fn parse(&self, input: &str) -> ParseResult<MoveRoll> {
        let caps = DICE.captures(input).ok_or_else(|| ParseError::NoMatch {
            system: SystemKind::Apocalypse,
            input: input.to_string(),
        })?;
        let magnitude = capture::<i64>(&caps, 2, "modifier")?.unwrap_or(0);
        Ok(MoveRoll {
            modifier: signed(caps.get(1).map(|m| m.as_str()), magnitude),
        })
    }

    fn roll<D: DieSource + ?Sized>(&self, _spec: &MoveRoll, dice: &mut D) -> Vec<u32> {
        dice.roll_dice(MoveRoll::COUNT as usize, MoveRoll::SIDES)
    }

    fn render(&self, faces: &[u32], spec: &MoveRoll) -> String {
        spec.outcome(faces).to_string()
    }
}
