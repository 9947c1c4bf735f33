//! CLI frontend for the Tyche dice roller.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tyche_dice::SystemKind;

#[derive(Parser)]
#[command(
    name = "tyche",
    about = "Tyche, the diceroller",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll dice: XdY(+/-Z) generic, X(eY)(r) Chronicles of Darkness, +/-X Apocalypse
    Roll {
        /// Dice notation; multiple words are joined with spaces
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        dice: Vec<String>,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Only try these systems, in this order (generic, wod, pbta)
        #[arg(long = "system", value_name = "SYSTEM")]
        systems: Vec<SystemKind>,

        /// Print the full roll as JSON
        #[arg(long)]
        json: bool,

        /// Fail when no system recognizes the dice instead of printing nothing
        #[arg(long)]
        strict: bool,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the supported notations in dispatch order
    Systems {
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Roll {
            dice,
            seed,
            systems,
            json,
            strict,
            config,
        } => commands::roll::run(
            &dice,
            commands::roll::RollOptions {
                seed,
                systems,
                json,
                strict,
                config,
            },
        )?,
        Commands::Systems { config } => commands::systems::run(config.as_deref())?,
    }

    Ok(())
}

/// Log to stderr so stdout carries only roll results.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
