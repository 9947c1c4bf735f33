use std::path::PathBuf;

use tracing::debug;
use tyche_dice::{Dispatcher, SystemKind};

use crate::error::CliError;

/// Flags that adjust a single roll.
pub struct RollOptions {
    pub seed: Option<u64>,
    pub systems: Vec<SystemKind>,
    pub json: bool,
    pub strict: bool,
    pub config: Option<PathBuf>,
}

pub fn run(dice: &[String], opts: RollOptions) -> Result<(), CliError> {
    let mut config = super::load_config(opts.config.as_deref())?;
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    if !opts.systems.is_empty() {
        config = config.with_systems(opts.systems);
    }
    config.validate()?;

    let dispatcher = Dispatcher::from_config(&config);
    let mut source = config.die_source();
    // Same joining the chat command applies to its arguments.
    let input = dice.join(" ");
    debug!(input = %input, seed = ?config.seed, order = ?dispatcher.order(), "dispatching");

    match dispatcher.roll(&input, &mut source) {
        Some(rolled) if opts.json => println!("{}", serde_json::to_string_pretty(&rolled)?),
        Some(rolled) => println!("{rolled}"),
        None if opts.strict => return Err(CliError::Unrecognized(input)),
        None => {}
    }

    Ok(())
}
