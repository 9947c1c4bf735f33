//! Dice notation parsers and roll engines for Tyche.
//!
//! Three unrelated tabletop notations share one parse/roll/render contract:
//! a generic `NdM+K` roller, a World of Darkness die pool with exploding
//! and rote dice, and a Powered by the Apocalypse 2d6 move. The
//! [`Dispatcher`] tries each notation in a fixed order and lets the first
//! one that recognizes the input own the roll.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod outcome;
pub mod source;
pub mod system;

pub use config::DiceConfig;
pub use dispatch::{Dispatcher, Rolled};
pub use error::{ConfigError, ParseError, ParseResult};
pub use outcome::{MoveOutcome, PoolOutcome};
pub use source::{DieSource, RngSource, ScriptedDice};
pub use system::{
    Apocalypse, DiceSystem, Generic, GenericRoll, MoveRoll, PoolRoll, RollSpec, SystemKind,
    UnknownSystem, WorldOfDarkness,
};
