// src/db/models/serve.rs

//! Serve model - the meal times a recipe can be served at

use crate::error::Result;
use rusqlite::{Connection, Row, params};

/// Association between a recipe and one meal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeAssignment {
    pub id: Option<i64>,
    pub recipe_id: i64,
    pub meal_id: i64,
}

impl ServeAssignment {
    /// Create a new ServeAssignment
    pub fn new(recipe_id: i64, meal_id: i64) -> Self {
        Self {
            id: None,
            recipe_id,
            meal_id,
        }
    }

    /// Insert this assignment into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO serve (recipe_id, meal_id) VALUES (?1, ?2)",
            params![&self.recipe_id, &self.meal_id],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Find all meal assignments for a recipe
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT serve_id, recipe_id, meal_id FROM serve WHERE recipe_id = ?1 ORDER BY meal_id",
        )?;

        let serves = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(serves)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            recipe_id: row.get(1)?,
            meal_id: row.get(2)?,
        })
    }
}
