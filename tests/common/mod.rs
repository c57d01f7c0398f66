// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use pantry::db;
use pantry::{RecipeDraft, ingest_recipe};
use tempfile::TempDir;

/// Fixture recipes: (name, meal ids, ingredient lines)
pub const KITCHEN: &[(&str, &[i64], &[&str])] = &[
    ("Pancakes", &[1], &["200 ml milk", "2 tbsp sugar"]),
    ("Cocoa", &[1, 4], &["250 ml milk", "2 tbsp cacao", "1 tbsp sugar", "1 tsp sugar"]),
    ("Berry bowl", &[2, 3], &["100 g strawberry", "50 g blue", "50 g black"]),
    ("Sweet milk", &[3], &["1 cup milk", "3 sugar"]),
    ("Plain water", &[2], &[]),
];

/// Create an empty, initialized database.
///
/// Returns (TempDir, db_path) - keep the TempDir alive to prevent cleanup.
pub fn setup_empty_db() -> (TempDir, String) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("recipes.db")
        .to_str()
        .unwrap()
        .to_string();

    db::init(&db_path).unwrap();
    (temp_dir, db_path)
}

/// Create a database holding every recipe in [`KITCHEN`], ids in fixture order.
pub fn setup_kitchen_db() -> (TempDir, String) {
    let (temp_dir, db_path) = setup_empty_db();
    let mut conn = db::open(&db_path).unwrap();

    for (name, meals, lines) in KITCHEN {
        let mut draft = RecipeDraft::new(*name, "");
        draft.meal_ids = meals.to_vec();
        draft.lines = lines.iter().map(|l| l.to_string()).collect();
        let report = ingest_recipe(&mut conn, &draft).unwrap();
        assert!(report.rejected.is_empty());
    }

    (temp_dir, db_path)
}

/// Names of fixture recipes whose ingredient lines mention every ingredient in `wanted`.
pub fn kitchen_covering_ingredients(wanted: &[&str]) -> Vec<String> {
    KITCHEN
        .iter()
        .filter(|(_, _, lines)| {
            wanted.iter().all(|w| {
                lines
                    .iter()
                    .any(|line| line.split_whitespace().last() == Some(*w))
            })
        })
        .map(|(name, _, _)| name.to_string())
        .collect()
}

/// Names of fixture recipes served at every meal id in `wanted`.
pub fn kitchen_covering_meals(wanted: &[i64]) -> Vec<String> {
    KITCHEN
        .iter()
        .filter(|(_, meals, _)| wanted.iter().all(|w| meals.contains(w)))
        .map(|(name, _, _)| name.to_string())
        .collect()
}

/// Names of fixture recipes served at any meal id in `wanted`.
pub fn kitchen_served_at_any(wanted: &[i64]) -> Vec<String> {
    KITCHEN
        .iter()
        .filter(|(_, meals, _)| wanted.iter().any(|w| meals.contains(w)))
        .map(|(name, _, _)| name.to_string())
        .collect()
}

/// Every subset of `items`, including the empty one.
pub fn subsets<T: Copy>(items: &[T]) -> Vec<Vec<T>> {
    (0..1u32 << items.len())
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, item)| *item)
                .collect()
        })
        .collect()
}
