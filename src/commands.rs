// src/commands.rs
//! Command handlers for the pantry CLI

use anyhow::{Context, Result};
use pantry::query::{self, RecipeFilter, Selection};
use pantry::session::IngestSession;
use rusqlite::Connection;
use std::io;
use tracing::info;

/// Interactive recipe entry until an empty recipe name
pub fn cmd_ingest(conn: &mut Connection) -> Result<()> {
    println!("Pass the empty recipe name to exit.");

    let stdin = io::stdin();
    let mut session = IngestSession::new(stdin.lock(), io::stdout());
    let reports = session.run(conn)?;

    info!("Session stored {} recipe(s)", reports.len());
    Ok(())
}

/// Print the recipes matching the filter
pub fn cmd_query(conn: &Connection, filter: &RecipeFilter, details: bool) -> Result<()> {
    let selection = query::find_recipes(conn, filter).context("Query failed")?;

    match &selection {
        Selection::Recipes(recipes) => {
            let names = selection.to_delimited().unwrap_or_default();
            println!("Recipes selected for you: {}", names);

            if details {
                for recipe in recipes {
                    let Some(id) = recipe.id else { continue };
                    if let Some(card) = query::recipe_card(conn, id)? {
                        println!();
                        print!("{}", card);
                    }
                }
            }
        }
        Selection::Empty => println!("no such recipes"),
    }

    Ok(())
}
