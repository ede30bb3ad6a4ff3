use crate::error::HarvestError;
use crate::extractors::{Page, RecipeExtractor};
use crate::fetchers::RequestFetcher;
use crate::model::{Field, FieldSelection, FieldValue, RecipeFields};
use crate::report::ReportWriter;
use crate::store::RecipeStore;
use log::{debug, error, info};
use std::io::Write;

/// Counters for one scrape batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Links handed to the run
    pub visited: usize,
    /// Recipes written to the report
    pub scraped: usize,
    /// Pages without ingredients
    pub skipped: usize,
    /// Pages that failed to fetch, extract or report
    pub failed: usize,
    /// Recipes written to the database
    pub stored: usize,
}

enum Outcome {
    NotARecipe,
    Scraped { stored: bool },
}

/// Drives the field extractors over a list of recipe links.
///
/// One bad page never stops the batch: its error is logged and the next link
/// is processed.
pub struct RecipeScraper<'a, W: Write> {
    fetcher: &'a RequestFetcher,
    extractor: &'a RecipeExtractor,
    selection: &'a FieldSelection,
    report: ReportWriter<W>,
    store: Option<&'a mut RecipeStore>,
}

impl<'a, W: Write> RecipeScraper<'a, W> {
    pub fn new(
        fetcher: &'a RequestFetcher,
        extractor: &'a RecipeExtractor,
        selection: &'a FieldSelection,
        report: ReportWriter<W>,
    ) -> Self {
        RecipeScraper {
            fetcher,
            extractor,
            selection,
            report,
            store: None,
        }
    }

    /// Also write every scraped recipe to `store`
    pub fn with_store(mut self, store: &'a mut RecipeStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the field mapping for `page`, or `None` when it is not a recipe
    pub fn assemble(&self, page: &Page) -> Result<Option<RecipeFields>, HarvestError> {
        let ingredients = self.extractor.ingredients(page);
        if ingredients.is_empty() {
            return Ok(None);
        }

        let mut fields = RecipeFields::new();
        for field in self.selection.iter() {
            let value = match field {
                Field::Ingredients => FieldValue::List(ingredients.clone()),
                other => self.extractor.extract(other, page)?,
            };
            fields.insert(field, value);
        }
        Ok(Some(fields))
    }

    fn process(&mut self, link: &str, sequence: usize) -> Result<Outcome, HarvestError> {
        let page = self.fetcher.fetch_page(link)?;
        let Some(fields) = self.assemble(&page)? else {
            debug!("Skipping non-recipe page {}", link);
            return Ok(Outcome::NotARecipe);
        };

        self.report.write_recipe(sequence, &fields)?;

        // A failed write loses this recipe's rows but keeps its report block
        let stored = match self.store.as_deref_mut() {
            Some(store) => match store.save_recipe(&fields) {
                Ok(recipe_id) => {
                    debug!("Recipe {} stored with id {}", sequence, recipe_id);
                    true
                }
                Err(e) => {
                    error!("Error storing recipe from link {}: {}", link, e);
                    false
                }
            },
            None => false,
        };
        Ok(Outcome::Scraped { stored })
    }

    /// Scrapes every link in order and flushes the report
    pub fn run(&mut self, links: &[String]) -> Result<ScrapeSummary, HarvestError> {
        let mut summary = ScrapeSummary::default();

        for link in links {
            summary.visited += 1;
            match self.process(link, summary.scraped + 1) {
                Ok(Outcome::NotARecipe) => summary.skipped += 1,
                Ok(Outcome::Scraped { stored }) => {
                    summary.scraped += 1;
                    if stored {
                        summary.stored += 1;
                    }
                    info!("Scraped recipe number: {}", summary.scraped);
                }
                Err(e) => {
                    summary.failed += 1;
                    error!("Error scraping recipe details from link {}: {}", link, e);
                }
            }
        }

        self.report.flush()?;
        Ok(summary)
    }

    pub fn into_report(self) -> ReportWriter<W> {
        self.report
    }
}
