// src/query.rs

//! Recipe queries by ingredient and meal
//!
//! A recipe covers an ingredient filter when every requested ingredient
//! appears among its quantity rows; extra ingredients do not matter. The
//! meal-only filter uses the same covering rule over serve rows. When both
//! filters are given, the meal side only requires the recipe to be served
//! at one of the requested meals.
//!
//! Ids are always bound as parameters; only placeholder lists are
//! formatted into the SQL text.

use crate::db::models::{QuantifiedIngredient, Recipe, ServeAssignment};
use crate::error::{Error, Result};
use crate::parser::IngredientLine;
use crate::vocabulary::{Category, registry};
use rusqlite::{Connection, params_from_iter};
use std::fmt;
use tracing::{debug, info};

/// Separator between recipe names in a delimited result
pub const NAME_SEPARATOR: &str = ", ";

/// Ingredient and meal names to filter by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub ingredients: Vec<String>,
    pub meals: Vec<String>,
}

/// Which query runs for a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    ByIngredients,
    ByMeals,
    ByBoth,
}

impl RecipeFilter {
    /// Build a filter from comma separated lists
    ///
    /// Segments are trimmed and empty segments dropped.
    pub fn from_lists(ingredients: Option<&str>, meals: Option<&str>) -> Self {
        Self {
            ingredients: split_list(ingredients),
            meals: split_list(meals),
        }
    }

    /// True when neither list names anything
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.meals.is_empty()
    }

    /// The query mode for this filter, or `None` when it is empty
    pub fn mode(&self) -> Option<QueryMode> {
        match (self.ingredients.is_empty(), self.meals.is_empty()) {
            (false, true) => Some(QueryMode::ByIngredients),
            (true, false) => Some(QueryMode::ByMeals),
            (false, false) => Some(QueryMode::ByBoth),
            (true, true) => None,
        }
    }
}

fn split_list(list: Option<&str>) -> Vec<String> {
    list.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Result of a recipe query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Matching recipes ordered by id
    Recipes(Vec<Recipe>),
    /// The query was valid but nothing qualified
    Empty,
}

impl Selection {
    fn from_recipes(recipes: Vec<Recipe>) -> Self {
        if recipes.is_empty() {
            Selection::Empty
        } else {
            Selection::Recipes(recipes)
        }
    }

    /// Matching recipes; empty for [`Selection::Empty`]
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            Selection::Recipes(recipes) => recipes,
            Selection::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Recipe names joined with [`NAME_SEPARATOR`], or `None` when nothing matched
    pub fn to_delimited(&self) -> Option<String> {
        match self {
            Selection::Recipes(recipes) => Some(
                recipes
                    .iter()
                    .map(|r| r.name.as_str())
                    .collect::<Vec<_>>()
                    .join(NAME_SEPARATOR),
            ),
            Selection::Empty => None,
        }
    }
}

/// Find the recipes that satisfy a filter
///
/// Every name is resolved against the vocabulary before any SQL runs; an
/// unknown name fails the whole query with `UnknownTerm`.
pub fn find_recipes(conn: &Connection, filter: &RecipeFilter) -> Result<Selection> {
    let mode = filter.mode().ok_or(Error::EmptyFilter)?;
    let vocab = registry();
    let ingredient_ids = vocab.resolve_all(Category::Ingredient, &filter.ingredients)?;
    let meal_ids = vocab.resolve_all(Category::Meal, &filter.meals)?;
    debug!(
        "Query {:?}: ingredient ids {:?}, meal ids {:?}",
        mode, ingredient_ids, meal_ids
    );

    let recipes = match mode {
        QueryMode::ByIngredients => covering(conn, Coverage::Ingredients, &ingredient_ids)?,
        QueryMode::ByMeals => covering(conn, Coverage::Meals, &meal_ids)?,
        QueryMode::ByBoth => covering_served_at_any(conn, &ingredient_ids, &meal_ids)?,
    };

    info!("Query {:?} matched {} recipe(s)", mode, recipes.len());
    Ok(Selection::from_recipes(recipes))
}

#[derive(Debug, Clone, Copy)]
enum Coverage {
    Ingredients,
    Meals,
}

impl Coverage {
    /// Link table and the id column it holds
    fn link(self) -> (&'static str, &'static str) {
        match self {
            Coverage::Ingredients => ("quantity", "ingredient_id"),
            Coverage::Meals => ("serve", "meal_id"),
        }
    }
}

/// `?1, ?2, ...` for `count` parameters starting at `first`
fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|n| format!("?{}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Covering sub-select: recipes whose link rows hold every id in the set
fn covering_subquery(coverage: Coverage, first: usize, count: usize) -> String {
    let (table, column) = coverage.link();
    format!(
        "SELECT recipe_id FROM {table} WHERE {column} IN ({ids})
         GROUP BY recipe_id HAVING COUNT(DISTINCT {column}) = ?{n}",
        ids = placeholders(first, count),
        n = first + count,
    )
}

fn covering(conn: &Connection, coverage: Coverage, ids: &[i64]) -> Result<Vec<Recipe>> {
    let sql = format!(
        "SELECT recipe_id, recipe_name, recipe_description FROM recipes
         WHERE recipe_id IN ({})
         ORDER BY recipe_id",
        covering_subquery(coverage, 1, ids.len()),
    );

    let mut values = ids.to_vec();
    values.push(ids.len() as i64);
    run(conn, &sql, values)
}

fn covering_served_at_any(
    conn: &Connection,
    ingredient_ids: &[i64],
    meal_ids: &[i64],
) -> Result<Vec<Recipe>> {
    let meal_start = ingredient_ids.len() + 2;
    let sql = format!(
        "SELECT recipe_id, recipe_name, recipe_description FROM recipes
         WHERE recipe_id IN ({})
           AND EXISTS (SELECT 1 FROM serve
                       WHERE serve.recipe_id = recipes.recipe_id
                         AND serve.meal_id IN ({}))
         ORDER BY recipe_id",
        covering_subquery(Coverage::Ingredients, 1, ingredient_ids.len()),
        placeholders(meal_start, meal_ids.len()),
    );

    let mut values = ingredient_ids.to_vec();
    values.push(ingredient_ids.len() as i64);
    values.extend_from_slice(meal_ids);
    run(conn, &sql, values)
}

fn run(conn: &Connection, sql: &str, values: Vec<i64>) -> Result<Vec<Recipe>> {
    let mut stmt = conn.prepare(sql)?;
    let recipes = stmt
        .query_map(params_from_iter(values), Recipe::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(recipes)
}

/// A recipe with its meals and ingredient lines spelled out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub recipe: Recipe,
    pub meals: Vec<&'static str>,
    pub lines: Vec<IngredientLine>,
}

impl fmt::Display for RecipeCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.recipe.name)?;
        if !self.recipe.description.is_empty() {
            writeln!(f, "  {}", self.recipe.description)?;
        }
        writeln!(f, "  Served at: {}", self.meals.join(NAME_SEPARATOR))?;
        for line in &self.lines {
            writeln!(f, "  - {}", line)?;
        }
        Ok(())
    }
}

/// Load a recipe and render its stored ids back into vocabulary names
///
/// Returns `None` when no recipe has this id. A stored id outside the
/// vocabulary is an `InvalidId` error.
pub fn recipe_card(conn: &Connection, recipe_id: i64) -> Result<Option<RecipeCard>> {
    let Some(recipe) = Recipe::find_by_id(conn, recipe_id)? else {
        return Ok(None);
    };
    let vocab = registry();

    let meals = ServeAssignment::find_by_recipe(conn, recipe_id)?
        .into_iter()
        .map(|serve| vocab.name_of(Category::Meal, serve.meal_id))
        .collect::<Result<Vec<_>>>()?;

    let lines = QuantifiedIngredient::find_by_recipe(conn, recipe_id)?
        .into_iter()
        .map(|row| -> Result<IngredientLine> {
            Ok(IngredientLine {
                quantity: row.quantity,
                measure: vocab.name_of(Category::Measure, row.measure_id)?.to_string(),
                ingredient: vocab
                    .name_of(Category::Ingredient, row.ingredient_id)?
                    .to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(RecipeCard {
        recipe,
        meals,
        lines,
    }))
}
