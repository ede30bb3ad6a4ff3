pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod logging;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod report;
pub mod store;

pub use config::HarvestConfig;
pub use error::{
    DurationError, HarvestError, InferenceError, NormalizeError, PersistenceError, ScrapeError,
};
pub use model::{
    CleanIngredient, DetailValue, Field, FieldSelection, FieldValue, IngredientEntry,
    RecipeFields, RecipeRecord, Reviews,
};
pub use pipelines::{IngredientNormalizer, NormalizeSummary, RecipeScraper, ScrapeSummary};
pub use store::RecipeStore;

use crate::extractors::RecipeExtractor;
use crate::fetchers::{discover_links, RequestFetcher};
use crate::providers::ProviderFactory;
use crate::report::ReportWriter;
use log::{info, warn};

/// Scrapes every discovered recipe link, writing the report and, when
/// enabled, the database.
pub fn run_scrape(
    config: &HarvestConfig,
    selection: &FieldSelection,
) -> Result<ScrapeSummary, HarvestError> {
    let fetcher = RequestFetcher::from_config(&config.source)?;
    let extractor = RecipeExtractor::new(&config.selectors)?;

    let persist = config.database.persist && selection.contains(Field::Ingredients);
    if config.database.persist && !persist {
        warn!("Recipes are only stored when ingredients are scraped; database writes disabled");
    }
    let mut store = if persist {
        Some(RecipeStore::open(&config.database.path)?)
    } else {
        None
    };

    let links = discover_links(&fetcher, &config.source)?;
    let report = ReportWriter::create(&config.output.report_path)?;

    let mut scraper = RecipeScraper::new(&fetcher, &extractor, selection, report);
    if let Some(store) = store.as_mut() {
        scraper = scraper.with_store(store);
    }
    let summary = scraper.run(&links)?;

    info!(
        "Scraped {} recipes from {} links ({} skipped, {} failed, {} stored)",
        summary.scraped, summary.visited, summary.skipped, summary.failed, summary.stored
    );
    Ok(summary)
}

/// Normalizes every unprocessed ingredient line in the database
pub fn run_normalize(config: &HarvestConfig) -> Result<NormalizeSummary, HarvestError> {
    let provider = ProviderFactory::create(&config.inference)?;
    let mut store = RecipeStore::open(&config.database.path)?;

    let summary = IngredientNormalizer::new(provider.as_ref(), &mut store).run()?;
    info!(
        "Normalized {} ingredient entries into {} rows",
        summary.entries, summary.clean_rows
    );
    Ok(summary)
}

/// Looks a stored recipe up by its exact title
pub fn find_recipe(
    config: &HarvestConfig,
    title: &str,
) -> Result<Option<RecipeRecord>, HarvestError> {
    let store = RecipeStore::open(&config.database.path)?;
    Ok(store.find_recipe_by_title(title)?)
}
