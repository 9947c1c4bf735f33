//! Outcome classification for the systems that grade their rolls.
//!
//! - **Die pool** (World of Darkness): count faces of 7 or more, watch for 1s
//! - **Move** (Powered by the Apocalypse): bucket the 2d6 total into hit bands
//!
//! The generic roller reports a plain total and has no outcome type.

use serde::Serialize;

/// Faces at or above this value count as successes in a die pool.
pub const POOL_SUCCESS: u32 = 7;

/// Successes needed for an exceptional result.
pub const POOL_EXCEPTIONAL: u32 = 5;

/// How a World of Darkness die pool turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PoolOutcome {
    /// No successes and at least one 1.
    DramaticFailure,
    /// No successes.
    Failure,
    /// Between one and four successes.
    Success(u32),
    /// Five or more successes.
    ExceptionalSuccess(u32),
}

impl PoolOutcome {
    /// Classify a set of d10 faces.
    pub fn classify(faces: &[u32]) -> Self {
        let successes = faces.iter().filter(|&&f| f >= POOL_SUCCESS).count() as u32;
        let botches = faces.iter().filter(|&&f| f == 1).count();

        if botches > 0 && successes == 0 {
            Self::DramaticFailure
        } else if successes == 0 {
            Self::Failure
        } else if successes < POOL_EXCEPTIONAL {
            Self::Success(successes)
        } else {
            Self::ExceptionalSuccess(successes)
        }
    }

    /// Number of successes scored.
    pub fn successes(self) -> u32 {
        match self {
            Self::DramaticFailure | Self::Failure => 0,
            Self::Success(n) | Self::ExceptionalSuccess(n) => n,
        }
    }
}

impl std::fmt::Display for PoolOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DramaticFailure => write!(f, "Dramatic failure"),
            Self::Failure => write!(f, "Failure"),
            Self::Success(n) => write!(f, "Success [{n}]"),
            Self::ExceptionalSuccess(n) => write!(f, "Exceptional success [{n}]"),
        }
    }
}

/// How a Powered by the Apocalypse move turned out, with its total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// Total below 7.
    Miss(i128),
    /// Total of 7 to 9.
    WeakHit(i128),
    /// Total of 10 or 11.
    StrongHit(i128),
    /// Total of 12 or more.
    ExceptionalHit(i128),
}

impl MoveOutcome {
    /// Classify a move by its total.
    pub fn classify(total: i128) -> Self {
        match total {
            t if t < 7 => Self::Miss(t),
            t if t < 10 => Self::WeakHit(t),
            t if t < 12 => Self::StrongHit(t),
            t => Self::ExceptionalHit(t),
        }
    }

    /// The total that was classified.
    pub fn total(self) -> i128 {
        match self {
            Self::Miss(t) | Self::WeakHit(t) | Self::StrongHit(t) | Self::ExceptionalHit(t) => t,
        }
    }
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Miss(t) => write!(f, "Miss [{t}]"),
            Self::WeakHit(t) => write!(f, "Weak hit [{t}]"),
            Self::StrongHit(t) => write!(f, "Strong hit [{t}]"),
            Self::ExceptionalHit(t) => write!(f, "Exceptional hit [{t}]"),
        }
    }
}
