use super::{insert, RecipeStore};
use crate::error::PersistenceError;
use crate::model::{CleanIngredient, IngredientEntry};
use rusqlite::ToSql;

impl RecipeStore {
    /// Raw ingredient lines not yet sent to the inference service
    pub fn unprocessed_entries(&self) -> Result<Vec<IngredientEntry>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, recipe_id, ingredient FROM ingredients WHERE processed = 0 ORDER BY id",
        )?;
        let entries = stmt
            .query_map([], |row| {
                Ok(IngredientEntry {
                    id: row.get(0)?,
                    recipe_id: row.get(1)?,
                    ingredient: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Stores the normalized rows of `entry` and marks it processed.
    ///
    /// Both writes share one transaction, so an entry is either fully recorded
    /// and marked, or left untouched for the next run.
    pub fn record_clean_ingredients(
        &mut self,
        entry: &IngredientEntry,
        cleaned: &[CleanIngredient],
    ) -> Result<(), PersistenceError> {
        let tx = self.conn.transaction()?;
        for clean in cleaned {
            insert(
                &tx,
                "ingredients_clean",
                &[
                    ("recipe_id", &clean.recipe_id as &dyn ToSql),
                    ("ingredient", &clean.ingredient),
                    ("quantity", &clean.quantity),
                ],
            )?;
        }
        tx.execute(
            "UPDATE ingredients SET processed = 1 WHERE id = ?1",
            [entry.id],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn clean_ingredients_for(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<CleanIngredient>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT recipe_id, ingredient, quantity FROM ingredients_clean
             WHERE recipe_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([recipe_id], |row| {
                Ok(CleanIngredient {
                    recipe_id: row.get(0)?,
                    ingredient: row.get(1)?,
                    quantity: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
