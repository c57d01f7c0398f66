// src/cli.rs
//! CLI definitions for pantry
//!
//! The actual command implementations are in the `commands` module.

use clap::Parser;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(author = "Pantry Contributors")]
#[command(version)]
#[command(
    about = "Prints recipes that can be made from the ingredients you provide",
    long_about = "Prints recipes that can be made from the ingredients you provide.\n\n\
                  Without --ingredients or --meals, starts interactive recipe entry instead."
)]
pub struct Cli {
    /// Path to the recipe database
    #[arg(env = "PANTRY_DB")]
    pub db_path: String,

    /// Comma separated ingredients every recipe must use (e.g. milk,sugar)
    #[arg(long)]
    pub ingredients: Option<String>,

    /// Comma separated meal times (e.g. breakfast,brunch)
    #[arg(long)]
    pub meals: Option<String>,

    /// Print each matching recipe with its meals and ingredient lines
    #[arg(long)]
    pub details: bool,
}
