//! Error types for the dice engine.

use std::path::PathBuf;

use crate::system::SystemKind;

/// Convenience result type for notation parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// A notation did not recognize its input.
///
/// Always recoverable: the dispatcher treats it as "try the next system".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input does not start with this system's notation.
    #[error("invalid dice for {system}: {input:?}")]
    NoMatch {
        /// The system that rejected the input.
        system: SystemKind,
        /// The rejected input.
        input: String,
    },

    /// A numeric field matched but could not be converted.
    #[error("invalid {field}: {value:?}")]
    InvalidNumber {
        /// Which field failed to convert.
        field: &'static str,
        /// The captured text.
        value: String,
    },

    /// An explosion threshold outside 7..=10.
    #[error("invalid explode: {0} (must be between 7 and 10)")]
    ExplodeOutOfRange(u32),

    /// A die with zero sides.
    #[error("dice must have at least one side")]
    NoSides,

    /// More dice than the configured limit.
    #[error("too many dice: {count} (limit {max})")]
    TooManyDice {
        /// The requested number of dice.
        count: u32,
        /// The configured limit.
        max: u32,
    },
}

/// Errors raised while loading a [`DiceConfig`](crate::DiceConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The config decoded but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}
