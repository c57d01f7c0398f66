// src/db/models/vocabulary_term.rs

//! Vocabulary rows stored in the `meals`, `ingredients`, and `measures` tables

use crate::error::{Error, Result};
use crate::vocabulary::{Category, registry};
use rusqlite::{Connection, params};

/// One stored vocabulary term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyTerm {
    pub category: Category,
    pub id: i64,
    pub name: String,
}

impl VocabularyTerm {
    /// Insert every registry term of `category` that is not stored yet
    ///
    /// Returns the number of rows added.
    pub fn seed(conn: &Connection, category: Category) -> Result<usize> {
        let sql = format!(
            "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?1, ?2)",
            category.table(),
            category.id_column(),
            category.name_column(),
        );
        let mut stmt = conn.prepare(&sql)?;

        let mut added = 0;
        for (id, name) in registry().entries(category) {
            added += stmt.execute(params![id, name])?;
        }
        Ok(added)
    }

    /// List the stored terms of a category in id order
    pub fn list(conn: &Connection, category: Category) -> Result<Vec<Self>> {
        let sql = format!(
            "SELECT {id}, {name} FROM {table} ORDER BY {id}",
            id = category.id_column(),
            name = category.name_column(),
            table = category.table(),
        );
        let mut stmt = conn.prepare(&sql)?;

        let terms = stmt
            .query_map([], |row| {
                Ok(Self {
                    category,
                    id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(terms)
    }

    /// Check that the stored terms are exactly the registry's terms
    ///
    /// A row that disagrees with the registry is `InvalidId`; a registry term
    /// with no row is `MissingTerm`.
    pub fn verify(conn: &Connection, category: Category) -> Result<()> {
        let stored = Self::list(conn, category)?;
        for term in &stored {
            let expected = registry().name_of(category, term.id)?;
            if expected != term.name {
                return Err(Error::InvalidId {
                    category,
                    id: term.id,
                });
            }
        }

        if stored.len() != registry().terms(category).len() {
            if let Some((id, name)) = registry()
                .entries(category)
                .find(|(id, _)| !stored.iter().any(|term| term.id == *id))
            {
                return Err(Error::MissingTerm { category, id, name });
            }
        }
        Ok(())
    }
}
