use super::{element_text, squash_whitespace, Selectors};
use crate::error::ScrapeError;
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

/// Text of the document's `<title>`
pub fn title(document: &Html, selectors: &Selectors) -> Result<String, ScrapeError> {
    document
        .select(&selectors.title)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::MissingMarkupElement("<title>".to_string()))
}

/// Ingredient lines, in page order.
///
/// Each ingredient list is split on blank lines. A page without any
/// ingredient list yields an empty vector, which marks it as a non-recipe page.
pub fn ingredients(document: &Html, selectors: &Selectors) -> Vec<String> {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    let blank_line = BLANK_LINE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap());

    document
        .select(&selectors.ingredients)
        .flat_map(|list| {
            let text = element_text(list);
            blank_line
                .split(&text)
                .map(squash_whitespace)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Publish date with its leading "Published on" style phrase removed
pub fn published(document: &Html, selectors: &Selectors) -> Result<String, ScrapeError> {
    let text = document
        .select(&selectors.date)
        .next()
        .map(|el| squash_whitespace(&element_text(el)))
        .ok_or_else(|| ScrapeError::MissingMarkupElement("publish date".to_string()))?;

    let date = selectors
        .date_prefixes
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix.as_str()))
        .unwrap_or(text.as_str());
    Ok(date.trim().to_string())
}

/// Breadcrumb entries, e.g. `["Recipes", "Breakfast and Brunch"]`
pub fn categories(document: &Html, selectors: &Selectors) -> Result<Vec<String>, ScrapeError> {
    let breadcrumb = document
        .select(&selectors.breadcrumb)
        .next()
        .ok_or_else(|| ScrapeError::MissingMarkupElement("category breadcrumb".to_string()))?;

    Ok(breadcrumb
        .select(&selectors.list_item)
        .map(|item| squash_whitespace(&element_text(item)))
        .filter(|category| !category.is_empty())
        .collect())
}
