pub mod roll;
pub mod systems;

use std::path::Path;

use tyche_dice::DiceConfig;

use crate::error::CliError;

/// Load the config file if one was given, defaults otherwise.
fn load_config(path: Option<&Path>) -> Result<DiceConfig, CliError> {
    match path {
        Some(path) => Ok(DiceConfig::load(path)?),
        None => Ok(DiceConfig::default()),
    }
}
