use super::{insert, RecipeStore};
use crate::error::PersistenceError;
use crate::model::{DetailValue, RecipeFields, RecipeRecord, Reviews};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{OptionalExtension, ToSql};
use std::collections::BTreeMap;

/// Publish dates as shown on the site, e.g. "March 3, 2023"
const SITE_DATE_FORMAT: &str = "%B %d, %Y";

fn stored_date(published: &str) -> String {
    NaiveDate::parse_from_str(published, SITE_DATE_FORMAT)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| published.to_string())
}

/// Looks a detail up by its label, ignoring the trailing colon
fn detail_number(details: Option<&[(String, DetailValue)]>, name: &str) -> Option<i64> {
    details?.iter().find_map(|(label, value)| {
        if label.trim_end_matches(':').trim() != name {
            return None;
        }
        match value {
            DetailValue::Minutes(n) | DetailValue::Count(n) => Some(i64::from(*n)),
            DetailValue::Text(_) => None,
        }
    })
}

fn nutrition_fact(nutrition: Option<&BTreeMap<String, i64>>, name: &str) -> Option<i64> {
    nutrition?.get(name).copied()
}

impl RecipeStore {
    /// Writes one assembled recipe across all tables in a single transaction.
    ///
    /// Fields that were not scraped are stored as NULL. A mapping without
    /// ingredients is refused.
    pub fn save_recipe(&mut self, fields: &RecipeFields) -> Result<i64, PersistenceError> {
        if fields.ingredients().is_empty() {
            return Err(PersistenceError::RecipeNotPersistable(
                "recipe has no ingredients".to_string(),
            ));
        }

        let num_reviews = fields.reviews().map(|reviews| match reviews {
            Reviews::Count(n) => n,
            Reviews::NoReviews => 0,
        });
        let rating = fields.rating().flatten();
        let date_published = fields.published().map(stored_date);

        let tx = self.conn.transaction()?;

        let recipe_id = insert(
            &tx,
            "recipes",
            &[
                ("link", &fields.link() as &dyn ToSql),
                ("title", &fields.title()),
                ("num_reviews", &num_reviews),
                ("rating", &rating),
                ("date_published", &date_published),
            ],
        )?;

        let details = fields.details();
        insert(
            &tx,
            "recipe_details",
            &[
                ("recipe_id", &recipe_id as &dyn ToSql),
                ("prep_time_mins", &detail_number(details, "Prep Time")),
                ("cook_time_mins", &detail_number(details, "Cook Time")),
                ("total_time_mins", &detail_number(details, "Total Time")),
                ("servings", &detail_number(details, "Servings")),
            ],
        )?;

        let nutrition = fields.nutrition();
        insert(
            &tx,
            "nutrition_facts",
            &[
                ("recipe_id", &recipe_id as &dyn ToSql),
                ("calories", &nutrition_fact(nutrition, "Calories")),
                ("fat_g", &nutrition_fact(nutrition, "Fat")),
                ("carbs_g", &nutrition_fact(nutrition, "Carbs")),
                ("protein_g", &nutrition_fact(nutrition, "Protein")),
            ],
        )?;

        for category in fields.categories() {
            let category_id = insert(&tx, "categories", &[("category", category as &dyn ToSql)])?;
            insert(
                &tx,
                "relationship",
                &[
                    ("category_id", &category_id as &dyn ToSql),
                    ("recipe_id", &recipe_id),
                ],
            )?;
        }

        for ingredient in fields.ingredients() {
            insert(
                &tx,
                "ingredients",
                &[
                    ("recipe_id", &recipe_id as &dyn ToSql),
                    ("ingredient", ingredient),
                ],
            )?;
        }

        tx.commit()?;
        debug!("Stored recipe {} ({:?})", recipe_id, fields.title());
        Ok(recipe_id)
    }

    /// First recipe stored under exactly this title
    pub fn find_recipe_by_title(&self, title: &str) -> Result<Option<RecipeRecord>, PersistenceError> {
        let record = self
            .conn
            .query_row(
                "SELECT id, link, title, num_reviews, rating, date_published
                 FROM recipes WHERE title = ?1 ORDER BY id LIMIT 1",
                [title],
                |row| {
                    Ok(RecipeRecord {
                        id: row.get(0)?,
                        link: row.get(1)?,
                        title: row.get(2)?,
                        num_reviews: row.get(3)?,
                        rating: row.get(4)?,
                        date_published: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }
}
