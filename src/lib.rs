// src/lib.rs

//! Pantry recipe store
//!
//! Stores recipes with the meals they are served at and their measured
//! ingredients, and answers "what can I make" queries over them.
//!
//! # Architecture
//!
//! - Vocabulary: fixed meals, ingredients, and measures with positional ids
//! - Parser: free-text `<quantity> [<measure>] <ingredient>` lines
//! - Store: SQLite tables for recipes, serve times, and quantities
//! - Query: covering filters over ingredients and meals

pub mod db;
mod error;
pub mod ingest;
pub mod parser;
pub mod query;
pub mod session;
pub mod vocabulary;

pub use error::{Error, Result};
pub use ingest::{IngestReport, RecipeDraft, RejectedLine, ingest_recipe};
pub use parser::{IngredientLine, IngredientParser};
pub use query::{QueryMode, RecipeCard, RecipeFilter, Selection, find_recipes, recipe_card};
pub use session::IngestSession;
pub use vocabulary::{Category, Ingredient, Meal, Measure, Term, Vocabulary, registry};
