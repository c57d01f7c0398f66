// src/db/models/mod.rs

//! Data models for pantry database entities
//!
//! This module defines Rust structs that correspond to database tables
//! and provides methods for creating and reading records. Recipes are
//! never updated or deleted, so there are no write paths beyond `insert`.

mod quantity;
mod recipe;
mod serve;
mod vocabulary_term;

pub use quantity::QuantifiedIngredient;
pub use recipe::Recipe;
pub use serve::ServeAssignment;
pub use vocabulary_term::VocabularyTerm;
