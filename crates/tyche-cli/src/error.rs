use miette::Diagnostic;
use thiserror::Error;

use tyche_dice::ConfigError;

/// Errors surfaced to the terminal.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(
        code(tyche::config),
        help("known keys: systems, seed, max_dice, max_explosion_rounds")
    )]
    Config(#[from] ConfigError),

    #[error("could not parse {0:?} as dice")]
    #[diagnostic(
        code(tyche::unrecognized),
        help("try XdY(+/-Z), X(eY)(r) or +/-X; `tyche systems` lists them all")
    )]
    Unrecognized(String),

    #[error("cannot encode roll as JSON: {0}")]
    #[diagnostic(code(tyche::json))]
    Json(#[from] serde_json::Error),
}
