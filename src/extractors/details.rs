use super::{element_text, Selectors};
use crate::duration::convert_to_minutes;
use crate::error::ScrapeError;
use crate::model::DetailValue;
use scraper::{ElementRef, Html};
use std::collections::BTreeMap;

const AMOUNT_CELL: usize = 0;
const LABEL_CELL: usize = 1;

fn detail_value(label: &str, raw: &str) -> Result<DetailValue, ScrapeError> {
    if label.contains("Time") {
        return Ok(DetailValue::Minutes(convert_to_minutes(raw)?));
    }
    if label == "Servings" && !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        let servings = raw.parse().map_err(|_| ScrapeError::InvalidValue {
            field: "servings",
            value: raw.to_string(),
        })?;
        return Ok(DetailValue::Count(servings));
    }
    Ok(DetailValue::Text(raw.to_string()))
}

/// The recipe details grid in page order, labelled without the trailing
/// colon ("Prep Time", "Servings", ...).
///
/// Time entries are converted to minutes and a purely numeric servings count
/// to an integer; everything else is kept as text.
pub fn details(
    document: &Html,
    selectors: &Selectors,
) -> Result<Vec<(String, DetailValue)>, ScrapeError> {
    let container = document
        .select(&selectors.details_content)
        .next()
        .ok_or_else(|| ScrapeError::MissingMarkupElement("recipe details".to_string()))?;

    let mut details = Vec::new();
    for label_element in container.select(&selectors.details_label) {
        let label = element_text(label_element)
            .trim_end_matches(':')
            .trim()
            .to_string();
        let value_element = label_element
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| {
                el.value()
                    .classes()
                    .any(|class| class == selectors.details_value_class)
            })
            .ok_or_else(|| {
                ScrapeError::MissingMarkupElement(format!("value for detail {label:?}"))
            })?;
        let value = detail_value(&label, &element_text(value_element))?;
        details.push((label, value));
    }
    Ok(details)
}

/// Nutrition summary table as label → amount, with gram suffixes removed
pub fn nutrition(
    document: &Html,
    selectors: &Selectors,
) -> Result<BTreeMap<String, i64>, ScrapeError> {
    let table = document
        .select(&selectors.nutrition_table)
        .next()
        .ok_or_else(|| ScrapeError::MissingMarkupElement("nutrition table".to_string()))?;

    let mut facts = BTreeMap::new();
    for row in table.select(&selectors.row) {
        let cells: Vec<String> = row.select(&selectors.cell).map(element_text).collect();
        let (Some(amount), Some(label)) = (cells.get(AMOUNT_CELL), cells.get(LABEL_CELL)) else {
            return Err(ScrapeError::MalformedNutritionRow(element_text(row)));
        };

        let amount = amount.to_lowercase();
        let digits = amount.strip_suffix('g').unwrap_or(&amount).trim();
        let value = digits.parse().map_err(|_| ScrapeError::InvalidValue {
            field: "nutrition",
            value: amount.clone(),
        })?;
        facts.insert(label.clone(), value);
    }
    Ok(facts)
}
