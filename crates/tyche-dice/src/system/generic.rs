//! Generic `NdM+K` roller.
//!
//! `N` defaults to 1, `K` to 0. Whitespace may surround the modifier's sign,
//! so `2d6 + 3` reads the same as `2d6+3`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{DEFAULT_MAX_DICE, DiceSystem, SystemKind, capture, check_count, signed};
use crate::error::{ParseError, ParseResult};
use crate::source::DieSource;

static DICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)?d(\d+)(?:\s*([+-])\s*(\d+))?").expect("valid regex")
});

/// A parsed `NdM+K` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenericRoll {
    /// Number of dice.
    pub count: u32,
    /// Sides per die, at least 1.
    pub sides: u32,
    /// Flat amount added to the sum.
    pub modifier: i64,
}

impl GenericRoll {
    /// Sum of `faces` plus the modifier.
    ///
    /// Widened to `i128` so no face count or modifier can overflow.
    pub fn total(&self, faces: &[u32]) -> i128 {
        faces.iter().map(|&f| i128::from(f)).sum::<i128>() + i128::from(self.modifier)
    }
}

impl std::fmt::Display for GenericRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

/// The generic roller: sums plain dice, no rerolls or explosions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generic {
    /// Largest accepted dice count.
    pub max_dice: u32,
}

impl Default for Generic {
    fn default() -> Self {
        Self {
            max_dice: DEFAULT_MAX_DICE,
        }
    }
}

impl DiceSystem for Generic {
    type Spec = GenericRoll;

    fn kind(&self) -> SystemKind {
        SystemKind::Generic
    }

    fn parse(&self, input: &str) -> ParseResult<GenericRoll> {
        let caps = DICE.captures(input).ok_or_else(|| ParseError::NoMatch {
            system: SystemKind::Generic,
            input: input.to_string(),
        })?;

        let count = capture::<u32>(&caps, 1, "count")?.unwrap_or(1);
        let sides = capture::<u32>(&caps, 2, "sides")?.unwrap_or(0);
        if sides == 0 {
            return Err(ParseError::NoSides);
        }
        let magnitude = capture::<i64>(&caps, 4, "modifier")?.unwrap_or(0);
        let modifier = signed(caps.get(3).map(|m| m.as_str()), magnitude);

        Ok(GenericRoll {
            count: check_count(count, self.max_dice)?,
            sides,
            modifier,
        })
    }

    fn roll<D: DieSource + ?Sized>(&self, spec: &GenericRoll, dice: &mut D) -> Vec<u32> {
        dice.roll_dice(spec.count as usize, spec.sides)
    }

    fn render(&self, faces: &[u32], spec: &GenericRoll) -> String {
        let listed = faces
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let total = spec.total(faces);
        if spec.modifier == 0 {
            format!("{listed} (total {total})")
        } else {
            format!("{listed} [{:+}] (total {total})", spec.modifier)
        }
    }
}
