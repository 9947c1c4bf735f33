//! Configuration for the dice roller.
//!
//! Loaded from TOML, every key optional:
//!
//! ```toml
//! systems = ["generic", "wod", "pbta"]
//! seed = 42
//! max_dice = 1000
//! max_explosion_rounds = 1000
//! ```

use std::path::Path;

use rand::rngs::StdRng;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::source::RngSource;
use crate::system::wod::DEFAULT_MAX_EXPLOSION_ROUNDS;
use crate::system::{DEFAULT_MAX_DICE, SystemKind};

/// Settings shared by the dispatcher and its systems.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiceConfig {
    /// Systems to try, in order.
    pub systems: Vec<SystemKind>,
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Largest dice count any notation accepts.
    pub max_dice: u32,
    /// Explosion rounds allowed per die-pool roll.
    pub max_explosion_rounds: u32,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            systems: SystemKind::ALL.to_vec(),
            seed: None,
            max_dice: DEFAULT_MAX_DICE,
            max_explosion_rounds: DEFAULT_MAX_EXPLOSION_ROUNDS,
        }
    }
}

impl DiceConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the dispatch order.
    pub fn with_systems(mut self, systems: impl IntoIterator<Item = SystemKind>) -> Self {
        self.systems = systems.into_iter().collect();
        self
    }

    /// Set the dice-count limit.
    pub fn with_max_dice(mut self, max: u32) -> Self {
        self.max_dice = max;
        self
    }

    /// Set the explosion round limit (at least 1).
    pub fn with_max_explosion_rounds(mut self, rounds: u32) -> Self {
        self.max_explosion_rounds = rounds.max(1);
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check for values no dispatcher can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.systems.is_empty() {
            return Err(ConfigError::Invalid("systems must not be empty".into()));
        }
        for (i, kind) in self.systems.iter().enumerate() {
            if self.systems[..i].contains(kind) {
                return Err(ConfigError::Invalid(format!("system {kind} listed twice")));
            }
        }
        if self.max_explosion_rounds == 0 {
            return Err(ConfigError::Invalid(
                "max_explosion_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// A die source honoring the configured seed.
    pub fn die_source(&self) -> RngSource<StdRng> {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_os(),
        }
    }
}
