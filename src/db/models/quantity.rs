// src/db/models/quantity.rs

//! Quantity model - one measured ingredient line of a recipe

use crate::error::Result;
use rusqlite::{Connection, Row, params};

/// A quantified ingredient belonging to a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantifiedIngredient {
    pub id: Option<i64>,
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub measure_id: i64,
    pub quantity: i64,
}

impl QuantifiedIngredient {
    /// Create a new QuantifiedIngredient
    pub fn new(recipe_id: i64, ingredient_id: i64, measure_id: i64, quantity: i64) -> Self {
        Self {
            id: None,
            recipe_id,
            ingredient_id,
            measure_id,
            quantity,
        }
    }

    /// Insert this ingredient line into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO quantity (measure_id, ingredient_id, quantity, recipe_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &self.measure_id,
                &self.ingredient_id,
                &self.quantity,
                &self.recipe_id,
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Find all ingredient lines of a recipe in entry order
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT quantity_id, recipe_id, ingredient_id, measure_id, quantity
             FROM quantity WHERE recipe_id = ?1 ORDER BY quantity_id",
        )?;

        let rows = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            recipe_id: row.get(1)?,
            ingredient_id: row.get(2)?,
            measure_id: row.get(3)?,
            quantity: row.get(4)?,
        })
    }
}
