// src/parser.rs

//! Ingredient line parser
//!
//! Lines have the shape `<quantity> [<measure>] <ingredient>`, for example
//! `500 ml milk` or `3 sugar`. Measure and ingredient must be exact
//! vocabulary terms and nothing may follow the ingredient.

use crate::error::{Error, Result};
use crate::vocabulary::{Category, longest_first, registry};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static STANDARD: LazyLock<IngredientParser> = LazyLock::new(|| {
    let vocab = registry();
    IngredientParser::new(
        vocab.terms(Category::Measure),
        vocab.terms(Category::Ingredient),
    )
    .expect("vocabulary terms are escaped into a valid pattern")
});

/// A parsed ingredient line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub quantity: i64,
    /// Empty when the line carries no unit
    pub measure: String,
    pub ingredient: String,
}

impl IngredientLine {
    /// Parse a line against the standard vocabulary
    pub fn parse(line: &str) -> Result<Self> {
        STANDARD.parse(line)
    }

    /// Id of the measure in the vocabulary registry
    pub fn measure_id(&self) -> Result<i64> {
        registry().id_of(Category::Measure, &self.measure)
    }

    /// Id of the ingredient in the vocabulary registry
    pub fn ingredient_id(&self) -> Result<i64> {
        registry().id_of(Category::Ingredient, &self.ingredient)
    }
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.measure.is_empty() {
            write!(f, "{} {}", self.quantity, self.ingredient)
        } else {
            write!(f, "{} {} {}", self.quantity, self.measure, self.ingredient)
        }
    }
}

/// Matcher built from a measure list and an ingredient list
///
/// Alternatives are tried longest first, so when a line could be split two
/// ways the longer measure wins.
#[derive(Debug, Clone)]
pub struct IngredientParser {
    pattern: Regex,
}

impl IngredientParser {
    /// Build a parser; the empty measure is implied by the optional measure group
    pub fn new(measures: &[&str], ingredients: &[&str]) -> Result<Self> {
        let pattern = format!(
            r"^(?P<quantity>[0-9]+)(?:\s+(?P<measure>{}))?\s+(?P<ingredient>{})$",
            alternation(measures),
            alternation(ingredients),
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// The compiled pattern source
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Parse one line; surrounding whitespace is ignored
    pub fn parse(&self, line: &str) -> Result<IngredientLine> {
        let unparseable = || Error::UnparseableLine {
            line: line.to_string(),
        };

        let caps = self.pattern.captures(line.trim()).ok_or_else(unparseable)?;
        let quantity = caps["quantity"].parse::<i64>().map_err(|_| unparseable())?;
        let measure = caps.name("measure").map_or("", |m| m.as_str());

        Ok(IngredientLine {
            quantity,
            measure: measure.to_string(),
            ingredient: caps["ingredient"].to_string(),
        })
    }
}

/// Escaped non-empty terms joined longest first; ties keep input order
fn alternation(terms: &[&str]) -> String {
    longest_first(terms)
        .into_iter()
        .filter(|term| !term.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}
