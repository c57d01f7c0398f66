// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use pantry::query::RecipeFilter;
use tracing::debug;

fn main() -> Result<()> {
    // Logs go to stderr so prompts and results on stdout stay readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    debug!("Preparing database at {}", cli.db_path);
    let mut conn = pantry::db::init(&cli.db_path)?;

    let filter = RecipeFilter::from_lists(cli.ingredients.as_deref(), cli.meals.as_deref());
    if filter.is_empty() {
        commands::cmd_ingest(&mut conn)
    } else {
        commands::cmd_query(&conn, &filter, cli.details)
    }
}
