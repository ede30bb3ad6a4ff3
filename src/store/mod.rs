//! SQLite persistence: schema, recipe writes and ingredient bookkeeping.

mod ingredients;
mod recipes;

use crate::error::PersistenceError;
use log::debug;
use rusqlite::{Connection, ToSql};
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    link VARCHAR(150),
    title VARCHAR(50),
    num_reviews INT,
    rating REAL,
    date_published DATETIME
);
CREATE TABLE IF NOT EXISTS ingredients (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    recipe_id INT REFERENCES recipes(id),
    ingredient VARCHAR(100),
    processed INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS recipe_details (
    recipe_id INT PRIMARY KEY REFERENCES recipes(id),
    prep_time_mins INT,
    cook_time_mins INT,
    total_time_mins INT,
    servings INT
);
CREATE TABLE IF NOT EXISTS nutrition_facts (
    recipe_id INT PRIMARY KEY REFERENCES recipes(id),
    calories INT,
    fat_g INT,
    carbs_g INT,
    protein_g INT
);
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    category VARCHAR(50)
);
CREATE TABLE IF NOT EXISTS instructions (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    recipe_id INT REFERENCES recipes(id),
    step INT,
    description TEXT
);
CREATE TABLE IF NOT EXISTS relationship (
    category_id INT REFERENCES categories(id),
    recipe_id INT REFERENCES recipes(id)
);
CREATE TABLE IF NOT EXISTS ingredients_clean (
    recipe_id INT REFERENCES recipes(id),
    ingredient VARCHAR(100),
    quantity REAL
);
CREATE INDEX IF NOT EXISTS idx_recipes_title ON recipes (title);
CREATE INDEX IF NOT EXISTS idx_ingredients_processed ON ingredients (processed);
";

/// Handle on the recipe database, held for the length of one run
pub struct RecipeStore {
    conn: Connection,
}

impl RecipeStore {
    /// Opens (creating if needed) the database at `path` and ensures the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        debug!("Opening database {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = RecipeStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn init_schema(&self) -> Result<(), PersistenceError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Number of rows in `table`
    pub fn count(&self, table: &str) -> Result<i64, PersistenceError> {
        Ok(self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Inserts one row and returns its rowid
pub(crate) fn insert(
    conn: &Connection,
    table: &str,
    data: &[(&str, &dyn ToSql)],
) -> Result<i64, PersistenceError> {
    let cols: Vec<&str> = data.iter().map(|(k, _)| *k).collect();
    let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        cols.join(", "),
        placeholders.join(", ")
    );
    let params: Vec<&dyn ToSql> = data.iter().map(|(_, v)| *v).collect();
    conn.execute(&sql, params.as_slice())?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_every_table() {
        let store = RecipeStore::open_in_memory().unwrap();
        for table in [
            "recipes",
            "ingredients",
            "recipe_details",
            "nutrition_facts",
            "categories",
            "instructions",
            "relationship",
            "ingredients_clean",
        ] {
            assert_eq!(store.count(table).unwrap(), 0, "table {table}");
        }
    }

    #[test]
    fn test_init_schema_is_repeatable() {
        let store = RecipeStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
    }

    #[test]
    fn test_insert_returns_rowid() {
        let store = RecipeStore::open_in_memory().unwrap();
        let conn = store.connection();
        let first = insert(conn, "categories", &[("category", &"Soup" as &dyn ToSql)]).unwrap();
        let second = insert(conn, "categories", &[("category", &"Bread" as &dyn ToSql)]).unwrap();
        assert_eq!(second, first + 1);
    }
}
