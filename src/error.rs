// src/error.rs

//! Error types for the pantry library

use crate::vocabulary::Category;
use thiserror::Error;

/// Errors raised by the vocabulary, parser, store, and query engine
#[derive(Error, Debug)]
pub enum Error {
    /// A name is not part of the fixed vocabulary
    #[error("Unknown {category} '{name}'")]
    UnknownTerm { category: Category, name: String },

    /// A stored or supplied id does not map to any vocabulary term
    #[error("Invalid {category} id {id}")]
    InvalidId { category: Category, id: i64 },

    /// A vocabulary table lacks a registry term, e.g. because seeding was ignored
    #[error("Stored {category} table is missing '{name}' (id {id})")]
    MissingTerm {
        category: Category,
        id: i64,
        name: &'static str,
    },

    /// An ingredient line did not match `<quantity> [<measure>] <ingredient>`
    #[error("Unparseable ingredient line: '{line}'")]
    UnparseableLine { line: String },

    /// Recipes need a non-empty name
    #[error("Recipe name must not be empty")]
    EmptyRecipeName,

    /// Recipes must be served at one or more meals
    #[error("Recipe must be served at one or more meals")]
    NoMeals,

    /// A query was issued without any ingredient or meal filter
    #[error("Query needs at least one ingredient or meal")]
    EmptyFilter,

    /// Storage error, passed through unchanged
    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    /// I/O error while prompting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to compile the ingredient line pattern
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type for pantry operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors the interactive session can recover from by asking again
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::UnparseableLine { .. })
    }
}
