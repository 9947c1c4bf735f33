use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::error::CliError;

pub fn run(config: Option<&Path>) -> Result<(), CliError> {
    let config = super::load_config(config)?;
    config.validate()?;

    println!("  {}", "Dice Systems".bold().underline());
    println!("  {}", "Tried in this order; the first match rolls.".dimmed());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "System", "Key", "Notation", "Example"]);
    for (i, kind) in config.systems.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            kind.title().to_string(),
            kind.to_string(),
            kind.notation().to_string(),
            kind.example().to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
