// src/db/mod.rs

//! SQLite storage for recipes and the vocabulary lookup tables
//!
//! One connection per process, opened with foreign-key enforcement on.
//! Each unit of work (schema creation, one recipe, one query) runs inside
//! its own commit boundary via [`transaction`].

pub mod models;
pub mod schema;

use crate::error::Result;
use rusqlite::{Connection, Transaction};
use tracing::debug;

/// Open a connection with foreign keys enforced
pub fn open(db_path: &str) -> Result<Connection> {
    debug!("Opening database at {}", db_path);
    let conn = Connection::open(db_path)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(conn)
}

/// Open the database, creating the schema and seeding the vocabulary tables if they are missing
///
/// Returns the migrated connection for the rest of the process to use.
pub fn init(db_path: &str) -> Result<Connection> {
    let conn = open(db_path)?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Run `f` inside a transaction, committing on `Ok` and rolling back on `Err`
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}
