//! World of Darkness die pools.
//!
//! `N` d10s, each face of 7 or more a success. `eT` lowers the explosion
//! threshold from 10 to `T` (7 to 10), and a trailing `r` makes the roll a
//! rote: every failed die is rerolled once. Exploding dice add one fresh die
//! each, and chain for as long as the fresh dice keep exploding.
//!
//! Dice that explode are picked from the first throw, before the rote
//! reroll. Rerolled dice never explode, even when they land at or above
//! the threshold.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{trace, warn};

use super::{DEFAULT_MAX_DICE, DiceSystem, SystemKind, capture, check_count};
use crate::error::{ParseError, ParseResult};
use crate::outcome::{POOL_SUCCESS, PoolOutcome};
use crate::source::DieSource;

static DICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:e(\d+))?(r?)").expect("valid regex"));

/// Explosion rounds allowed before a chain is cut short.
pub const DEFAULT_MAX_EXPLOSION_ROUNDS: u32 = 1000;

/// A parsed die-pool request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolRoll {
    /// Dice in the pool.
    pub count: u32,
    /// Faces at or above this value explode (7 to 10).
    pub explode_at: u32,
    /// Reroll failed dice once.
    pub rote: bool,
}

impl PoolRoll {
    /// Pools always roll d10s.
    pub const SIDES: u32 = 10;
    /// Threshold used when the notation gives none.
    pub const DEFAULT_EXPLODE_AT: u32 = 10;
    /// Lowest accepted explosion threshold.
    pub const MIN_EXPLODE_AT: u32 = 7;

    fn explodes(&self, face: u32) -> bool {
        face >= self.explode_at
    }
}

/// The World of Darkness pool roller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldOfDarkness {
    /// Largest accepted pool.
    pub max_dice: u32,
    /// Explosion rounds allowed per roll, at least 1.
    pub max_explosion_rounds: u32,
}

impl Default for WorldOfDarkness {
    fn default() -> Self {
        Self {
            max_dice: DEFAULT_MAX_DICE,
            max_explosion_rounds: DEFAULT_MAX_EXPLOSION_ROUNDS,
        }
    }
}

impl DiceSystem for WorldOfDarkness {
    type Spec = PoolRoll;

    fn kind(&self) -> SystemKind {
        SystemKind::WorldOfDarkness
    }

    fn parse(&self, input: &str) -> ParseResult<PoolRoll> {
        let caps = DICE.captures(input).ok_or_else(|| ParseError::NoMatch {
            system: SystemKind::WorldOfDarkness,
            input: input.to_string(),
        })?;

        let count = capture::<u32>(&caps, 1, "count")?.unwrap_or(0);
        let explode_at =
            capture::<u32>(&caps, 2, "explode_at")?.unwrap_or(PoolRoll::DEFAULT_EXPLODE_AT);
        if !(PoolRoll::MIN_EXPLODE_AT..=PoolRoll::SIDES).contains(&explode_at) {
            return Err(ParseError::ExplodeOutOfRange(explode_at));
        }
        let rote = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        Ok(PoolRoll {
            count: check_count(count, self.max_dice)?,
            explode_at,
            rote,
        })
    }

    fn roll<D: DieSource + ?Sized>(&self, spec: &PoolRoll, dice: &mut D) -> Vec<u32> {
        let mut faces = dice.roll_dice(spec.count as usize, PoolRoll::SIDES);
        let mut exploding = faces.iter().filter(|&&f| spec.explodes(f)).count();

        if spec.rote {
            faces.retain(|&f| f >= POOL_SUCCESS);
            let failed = spec.count as usize - faces.len();
            faces.extend(dice.roll_dice(failed, PoolRoll::SIDES));
        }

        let mut rounds = 0;
        while exploding > 0 {
            if rounds >= self.max_explosion_rounds {
                warn!(
                    rounds,
                    pending = exploding,
                    "explosion chain cut short at the round limit"
                );
                break;
            }
            rounds += 1;
            let fresh = dice.roll_dice(exploding, PoolRoll::SIDES);
            exploding = fresh.iter().filter(|&&f| spec.explodes(f)).count();
            trace!(round = rounds, rolled = fresh.len(), exploding, "explosion round");
            faces.extend(fresh);
        }

        faces
    }

    fn render(&self, faces: &[u32], _spec: &PoolRoll) -> String {
        let mut sorted = faces.to_vec();
        sorted.sort_unstable();
        sorted.reverse();
        let listed = sorted
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}\n({listed})", PoolOutcome::classify(faces))
    }
}
