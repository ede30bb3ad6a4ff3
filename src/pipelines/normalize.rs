use crate::error::NormalizeError;
use crate::model::{CleanIngredient, IngredientEntry};
use crate::providers::LlmProvider;
use crate::store::RecipeStore;
use log::info;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategorizedReply {
    ingredients: Vec<CategorizedIngredient>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategorizedIngredient {
    quantity: Option<f64>,
    ingredient: String,
}

/// Parses the structured reply for `entry` into clean ingredient rows.
///
/// The reply must be exactly the JSON object requested by the prompt; anything
/// else, including an empty `ingredients` array or a negative quantity, is an
/// [`NormalizeError::InferenceParseError`].
pub fn parse_reply(
    entry: &IngredientEntry,
    reply: &str,
) -> Result<Vec<CleanIngredient>, NormalizeError> {
    let parse_error = |reason: String| NormalizeError::InferenceParseError {
        entry_id: entry.id,
        reason,
    };

    let parsed: CategorizedReply =
        serde_json::from_str(reply.trim()).map_err(|e| parse_error(e.to_string()))?;
    if parsed.ingredients.is_empty() {
        return Err(parse_error("reply lists no ingredients".to_string()));
    }

    parsed
        .ingredients
        .into_iter()
        .map(|item| match item.quantity {
            Some(q) if q < 0.0 => Err(parse_error(format!("negative quantity {q}"))),
            quantity => Ok(CleanIngredient {
                recipe_id: entry.recipe_id,
                ingredient: item.ingredient.trim().to_string(),
                quantity,
            }),
        })
        .collect()
}

/// Counters for one normalization run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub entries: usize,
    pub clean_rows: usize,
}

/// Sends every unprocessed ingredient line through the inference provider.
///
/// The first failure aborts the run; entries handled before it stay recorded.
pub struct IngredientNormalizer<'a> {
    provider: &'a dyn LlmProvider,
    store: &'a mut RecipeStore,
}

impl<'a> IngredientNormalizer<'a> {
    pub fn new(provider: &'a dyn LlmProvider, store: &'a mut RecipeStore) -> Self {
        IngredientNormalizer { provider, store }
    }

    fn normalize_entry(&mut self, entry: &IngredientEntry) -> Result<usize, NormalizeError> {
        info!("Processing: '{}'", entry.ingredient);
        let reply = self
            .provider
            .categorize(&entry.ingredient)
            .map_err(|source| NormalizeError::Inference {
                entry_id: entry.id,
                source,
            })?;

        let cleaned = parse_reply(entry, &reply)?;
        self.store.record_clean_ingredients(entry, &cleaned)?;
        for clean in &cleaned {
            info!(
                "Clean data inserted: ingredient: {} | quantity: {:?}",
                clean.ingredient, clean.quantity
            );
        }
        Ok(cleaned.len())
    }

    pub fn run(&mut self) -> Result<NormalizeSummary, NormalizeError> {
        let entries = self.store.unprocessed_entries()?;
        info!(
            "Normalizing {} ingredient entries with {}",
            entries.len(),
            self.provider.provider_name()
        );

        let mut summary = NormalizeSummary::default();
        for entry in &entries {
            summary.clean_rows += self.normalize_entry(entry)?;
            summary.entries += 1;
        }
        Ok(summary)
    }
}
