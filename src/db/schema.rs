// src/db/schema.rs

//! Database schema definitions and migrations for pantry
//!
//! Six tables: the three vocabulary lookup tables (`meals`, `ingredients`,
//! `measures`), `recipes`, and the two link tables `serve` and `quantity`.
//! Every statement is create-if-absent, so an existing recipe database with
//! the same layout is adopted as-is.

use crate::db::models::VocabularyTerm;
use crate::error::Result;
use crate::vocabulary::Category;
use rusqlite::Connection;
use strum::IntoEnumIterator;
use tracing::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the schema version tracking table
fn init_schema_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    init_schema_version(conn)?;

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Apply all pending migrations, then check the vocabulary tables against the registry
///
/// Everything runs in one transaction: a failed migration or a vocabulary
/// mismatch leaves the database as it was.
pub fn migrate(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    let current_version = get_schema_version(&tx)?;
    debug!("Current schema version: {}", current_version);

    for version in (current_version + 1)..=SCHEMA_VERSION {
        info!("Applying migration to version {}", version);
        apply_migration(&tx, version)?;
        set_schema_version(&tx, version)?;
    }

    for category in Category::iter() {
        VocabularyTerm::verify(&tx, category)?;
    }

    tx.commit()?;
    Ok(())
}

/// Apply a specific migration version
fn apply_migration(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => migrate_v1(conn),
        _ => unreachable!("no migration for schema version {}", version),
    }
}

/// Initial schema - Version 1
///
/// Creates the lookup tables and seeds them from the vocabulary registry,
/// then the recipe tables with their foreign keys.
fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        -- Vocabulary lookup tables; ids are registry positions
        CREATE TABLE IF NOT EXISTS meals (
            meal_id INTEGER PRIMARY KEY,
            meal_name VARCHAR(30) NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS ingredients (
            ingredient_id INTEGER PRIMARY KEY,
            ingredient_name VARCHAR(30) NOT NULL UNIQUE
        );

        -- The empty measure_name is the unitless measure
        CREATE TABLE IF NOT EXISTS measures (
            measure_id INTEGER PRIMARY KEY,
            measure_name VARCHAR(30) UNIQUE
        );

        CREATE TABLE IF NOT EXISTS recipes (
            recipe_id INTEGER PRIMARY KEY,
            recipe_name VARCHAR(30) NOT NULL,
            recipe_description VARCHAR(30)
        );

        -- Serve: meal times a recipe is served at
        CREATE TABLE IF NOT EXISTS serve (
            serve_id INTEGER PRIMARY KEY,
            recipe_id INTEGER NOT NULL,
            meal_id INTEGER NOT NULL,
            FOREIGN KEY (recipe_id) REFERENCES recipes(recipe_id),
            FOREIGN KEY (meal_id) REFERENCES meals(meal_id)
        );

        CREATE INDEX IF NOT EXISTS idx_serve_recipe_id ON serve(recipe_id);
        CREATE INDEX IF NOT EXISTS idx_serve_meal_id ON serve(meal_id);

        -- Quantity: one row per ingredient line of a recipe
        CREATE TABLE IF NOT EXISTS quantity (
            quantity_id INTEGER PRIMARY KEY,
            measure_id INTEGER NOT NULL,
            ingredient_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            recipe_id INTEGER NOT NULL,
            FOREIGN KEY (measure_id) REFERENCES measures(measure_id),
            FOREIGN KEY (ingredient_id) REFERENCES ingredients(ingredient_id),
            FOREIGN KEY (recipe_id) REFERENCES recipes(recipe_id)
        );

        CREATE INDEX IF NOT EXISTS idx_quantity_recipe_id ON quantity(recipe_id);
        CREATE INDEX IF NOT EXISTS idx_quantity_ingredient_id ON quantity(ingredient_id);
        ",
    )?;

    for category in Category::iter() {
        let seeded = VocabularyTerm::seed(conn, category)?;
        debug!("Seeded {} {} term(s)", seeded, category);
    }

    info!("Schema version 1 created successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::NamedTempFile;

    fn create_test_db() -> (NamedTempFile, Connection) {
        let temp_file = NamedTempFile::new().unwrap();
        let conn = Connection::open(temp_file.path()).unwrap();
        conn.execute("PRAGMA foreign_keys = ON", []).unwrap();
        (temp_file, conn)
    }

    #[test]
    fn test_schema_version_tracking() {
        let (_temp, conn) = create_test_db();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);

        set_schema_version(&conn, 1).unwrap();
        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_migrate_creates_all_tables() {
        let (_temp, conn) = create_test_db();
        migrate(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        for table in ["meals", "ingredients", "measures", "recipes", "serve", "quantity"] {
            assert!(tables.contains(&table.to_string()), "missing table {}", table);
        }
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn test_migrate_seeds_vocabulary() {
        let (_temp, conn) = create_test_db();
        migrate(&conn).unwrap();

        let lunch: String = conn
            .query_row("SELECT meal_name FROM meals WHERE meal_id = 3", [], |row| row.get(0))
            .unwrap();
        assert_eq!(lunch, "lunch");

        let unitless: i64 = conn
            .query_row(
                "SELECT measure_id FROM measures WHERE measure_name = ''",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(unitless, 8);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let (_temp, conn) = create_test_db();

        migrate(&conn).unwrap();
        let version1 = get_schema_version(&conn).unwrap();

        migrate(&conn).unwrap();
        let version2 = get_schema_version(&conn).unwrap();

        assert_eq!(version1, version2);
        assert_eq!(version1, SCHEMA_VERSION);

        let meals: i64 = conn
            .query_row("SELECT COUNT(*) FROM meals", [], |row| row.get(0))
            .unwrap();
        assert_eq!(meals, 4);
    }

    #[test]
    fn test_migrate_adopts_existing_tables() {
        let (_temp, conn) = create_test_db();
        conn.execute_batch(
            "CREATE TABLE meals (meal_id INTEGER PRIMARY KEY, meal_name VARCHAR(30) NOT NULL UNIQUE);
             INSERT INTO meals VALUES (1, 'breakfast'), (2, 'brunch'), (3, 'lunch'), (4, 'supper');",
        )
        .unwrap();

        migrate(&conn).unwrap();

        let meals: i64 = conn
            .query_row("SELECT COUNT(*) FROM meals", [], |row| row.get(0))
            .unwrap();
        assert_eq!(meals, 4);
    }

    #[test]
    fn test_migrate_rejects_foreign_vocabulary() {
        let (_temp, conn) = create_test_db();
        conn.execute_batch(
            "CREATE TABLE meals (meal_id INTEGER PRIMARY KEY, meal_name VARCHAR(30) NOT NULL UNIQUE);
             INSERT INTO meals VALUES (1, 'dinner');",
        )
        .unwrap();

        assert!(matches!(
            migrate(&conn),
            Err(Error::InvalidId { category: Category::Meal, id: 1 })
        ));
    }

    #[test]
    fn test_migrate_rejects_unseeded_vocabulary() {
        let (_temp, conn) = create_test_db();
        // Extra NOT NULL column makes every seeding insert get ignored
        conn.execute_batch(
            "CREATE TABLE measures (
                measure_id INTEGER PRIMARY KEY,
                measure_name VARCHAR(30) UNIQUE,
                abbreviation TEXT NOT NULL
             );",
        )
        .unwrap();

        match migrate(&conn) {
            Err(Error::MissingTerm { category, id, name }) => {
                assert_eq!(category, Category::Measure);
                assert_eq!(id, 1);
                assert_eq!(name, "ml");
            }
            other => panic!("expected missing measure, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_migrate_leaves_database_untouched() {
        let (_temp, conn) = create_test_db();
        conn.execute_batch(
            "CREATE TABLE meals (meal_id INTEGER PRIMARY KEY, meal_name VARCHAR(30) NOT NULL UNIQUE);
             INSERT INTO meals VALUES (1, 'dinner');",
        )
        .unwrap();

        assert!(migrate(&conn).is_err());
        assert!(conn.is_autocommit());
        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        let recipe_tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='recipes'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(recipe_tables, 0);

        let meals: i64 = conn
            .query_row("SELECT COUNT(*) FROM meals", [], |row| row.get(0))
            .unwrap();
        assert_eq!(meals, 1);
    }

    #[test]
    fn test_foreign_key_constraints() {
        let (_temp, conn) = create_test_db();
        migrate(&conn).unwrap();

        // Quantity row pointing at a recipe that does not exist
        let result = conn.execute(
            "INSERT INTO quantity (measure_id, ingredient_id, quantity, recipe_id)
             VALUES (1, 1, 500, 999)",
            [],
        );
        assert!(result.is_err());

        conn.execute(
            "INSERT INTO recipes (recipe_name, recipe_description) VALUES ('Toast', '')",
            [],
        )
        .unwrap();

        // Meal id outside the vocabulary
        let result = conn.execute("INSERT INTO serve (recipe_id, meal_id) VALUES (1, 9)", []);
        assert!(result.is_err());
    }
}
