// src/ingest.rs

//! Recipe ingestion
//!
//! One recipe is written in a single transaction: the recipe row, one
//! serve row per meal, and one quantity row per ingredient line that
//! parses. Lines that do not parse are skipped and reported back; they
//! never abort the recipe.

use crate::db;
use crate::db::models::{QuantifiedIngredient, Recipe, ServeAssignment};
use crate::error::{Error, Result};
use crate::parser::IngredientLine;
use crate::vocabulary::{Category, registry};
use rusqlite::Connection;
use tracing::{info, warn};

/// Everything collected for one recipe before it is stored
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub meal_ids: Vec<i64>,
    /// Raw ingredient lines as typed
    pub lines: Vec<String>,
}

impl RecipeDraft {
    /// Create a draft with no meals or ingredient lines
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Add a meal id
    pub fn served_at(mut self, meal_id: i64) -> Self {
        self.meal_ids.push(meal_id);
        self
    }

    /// Add a raw ingredient line
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// A line that was skipped during ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line: String,
    pub reason: String,
}

/// Outcome of storing one recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub recipe_id: i64,
    pub meals: usize,
    pub stored: Vec<IngredientLine>,
    pub rejected: Vec<RejectedLine>,
}

/// Store a recipe, its serve times, and every ingredient line that parses
///
/// Fails without writing anything when the name is empty, no meal is given,
/// or a meal id is not part of the vocabulary. Storage errors roll the whole
/// recipe back.
pub fn ingest_recipe(conn: &mut Connection, draft: &RecipeDraft) -> Result<IngestReport> {
    if draft.name.is_empty() {
        return Err(Error::EmptyRecipeName);
    }

    let mut meal_ids: Vec<i64> = Vec::with_capacity(draft.meal_ids.len());
    for &meal_id in &draft.meal_ids {
        registry().name_of(Category::Meal, meal_id)?;
        if !meal_ids.contains(&meal_id) {
            meal_ids.push(meal_id);
        }
    }
    if meal_ids.is_empty() {
        return Err(Error::NoMeals);
    }

    let mut stored = Vec::new();
    let mut rejected = Vec::new();

    let recipe_id = db::transaction(conn, |tx| {
        let mut recipe = Recipe::new(draft.name.clone(), draft.description.clone());
        let recipe_id = recipe.insert(tx)?;

        for &meal_id in &meal_ids {
            ServeAssignment::new(recipe_id, meal_id).insert(tx)?;
        }

        for raw in &draft.lines {
            let line = match IngredientLine::parse(raw) {
                Ok(line) => line,
                Err(e) if e.is_recoverable() => {
                    warn!("Skipping ingredient line for '{}': {}", draft.name, e);
                    rejected.push(RejectedLine {
                        line: raw.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            QuantifiedIngredient::new(
                recipe_id,
                line.ingredient_id()?,
                line.measure_id()?,
                line.quantity,
            )
            .insert(tx)?;
            stored.push(line);
        }

        Ok(recipe_id)
    })?;

    info!(
        "Stored recipe '{}' (id {}) with {} ingredient(s), {} line(s) skipped",
        draft.name,
        recipe_id,
        stored.len(),
        rejected.len()
    );

    Ok(IngestReport {
        recipe_id,
        meals: meal_ids.len(),
        stored,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{Meal, Term};
    use tempfile::NamedTempFile;

    fn create_test_db() -> (NamedTempFile, Connection) {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();
        let conn = db::init(&path).unwrap();
        (temp_file, conn)
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_ingest_full_recipe() {
        let (_temp, mut conn) = create_test_db();

        let draft = RecipeDraft::new("Pancakes", "Sunday classic")
            .served_at(Meal::Breakfast.id())
            .served_at(Meal::Brunch.id())
            .with_line("200 ml milk")
            .with_line("2 tbsp sugar");

        let report = ingest_recipe(&mut conn, &draft).unwrap();
        assert_eq!(report.recipe_id, 1);
        assert_eq!(report.meals, 2);
        assert_eq!(report.stored.len(), 2);
        assert!(report.rejected.is_empty());

        assert_eq!(count(&conn, "recipes"), 1);
        assert_eq!(count(&conn, "serve"), 2);
        assert_eq!(count(&conn, "quantity"), 2);
    }

    #[test]
    fn test_unparseable_line_is_skipped_not_fatal() {
        let (_temp, mut conn) = create_test_db();

        let draft = RecipeDraft::new("Shake", "")
            .served_at(Meal::Lunch.id())
            .with_line("500 ml milk")
            .with_line("a handful of strawberry")
            .with_line("1 tsp sugar");

        let report = ingest_recipe(&mut conn, &draft).unwrap();
        assert_eq!(report.stored.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, "a handful of strawberry");

        assert_eq!(count(&conn, "recipes"), 1);
        assert_eq!(count(&conn, "quantity"), 2);
    }

    #[test]
    fn test_empty_name_writes_nothing() {
        let (_temp, mut conn) = create_test_db();

        let draft = RecipeDraft::new("", "").served_at(1).with_line("1 milk");
        assert!(matches!(
            ingest_recipe(&mut conn, &draft),
            Err(Error::EmptyRecipeName)
        ));
        assert_eq!(count(&conn, "recipes"), 0);
    }

    #[test]
    fn test_meals_are_required_and_validated() {
        let (_temp, mut conn) = create_test_db();

        let no_meals = RecipeDraft::new("Tea", "").with_line("1 cup milk");
        assert!(matches!(ingest_recipe(&mut conn, &no_meals), Err(Error::NoMeals)));

        let bad_meal = RecipeDraft::new("Tea", "").served_at(7);
        assert!(matches!(
            ingest_recipe(&mut conn, &bad_meal),
            Err(Error::InvalidId {
                category: Category::Meal,
                id: 7
            })
        ));
        assert_eq!(count(&conn, "recipes"), 0);
    }

    #[test]
    fn test_duplicate_meal_ids_collapse() {
        let (_temp, mut conn) = create_test_db();

        let draft = RecipeDraft::new("Toast", "")
            .served_at(1)
            .served_at(1)
            .served_at(4);
        let report = ingest_recipe(&mut conn, &draft).unwrap();
        assert_eq!(report.meals, 2);
        assert_eq!(count(&conn, "serve"), 2);
    }

    #[test]
    fn test_recipe_without_ingredients() {
        let (_temp, mut conn) = create_test_db();

        let draft = RecipeDraft::new("Water", "").served_at(3);
        let report = ingest_recipe(&mut conn, &draft).unwrap();
        assert!(report.stored.is_empty());
        assert_eq!(count(&conn, "recipes"), 1);
        assert_eq!(count(&conn, "quantity"), 0);
    }
}
