//! Field extractors for allrecipes recipe pages.
//!
//! Every extractor is a pure function of a parsed [`Page`] and the compiled
//! [`Selectors`]; [`RecipeExtractor::extract`] maps each [`Field`] to the
//! function producing it.

mod details;
mod markup;
mod reviews;

pub use details::{details, nutrition};
pub use markup::{categories, ingredients, published, title};
pub use reviews::{rating, reviews};

use crate::config::SelectorConfig;
use crate::error::ScrapeError;
use crate::model::{Field, FieldValue};
use scraper::{ElementRef, Html, Selector};

/// One fetched page: its URL and parsed markup
pub struct Page {
    url: String,
    document: Html,
}

impl Page {
    pub fn parse(url: &str, html: &str) -> Self {
        Page {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn document(&self) -> &Html {
        &self.document
    }
}

/// CSS selectors compiled once from [`SelectorConfig`]
pub struct Selectors {
    pub(crate) title: Selector,
    pub(crate) ingredients: Selector,
    pub(crate) details_content: Selector,
    pub(crate) details_label: Selector,
    pub(crate) details_value_class: String,
    pub(crate) reviews: Selector,
    pub(crate) rating: Selector,
    pub(crate) nutrition_table: Selector,
    pub(crate) row: Selector,
    pub(crate) cell: Selector,
    pub(crate) date: Selector,
    pub(crate) breadcrumb: Selector,
    pub(crate) list_item: Selector,
    pub(crate) date_prefixes: Vec<String>,
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector(format!("{css}: {e}")))
}

/// Accepts a configured class or id only if it is one plain CSS identifier
fn identifier(name: &str) -> Result<&str, ScrapeError> {
    let mut chars = name.chars();
    let valid_start = match chars.next() {
        Some('-') => chars
            .clone()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '-'),
        Some(c) => c.is_ascii_alphabetic() || c == '_',
        None => false,
    };
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        Ok(name)
    } else {
        Err(ScrapeError::InvalidSelector(format!(
            "{name:?} is not a class or id name"
        )))
    }
}

fn with_class(element: &str, class: &str) -> Result<Selector, ScrapeError> {
    compile(&format!("{element}.{}", identifier(class)?))
}

fn with_id(element: &str, id: &str) -> Result<Selector, ScrapeError> {
    compile(&format!("{element}#{}", identifier(id)?))
}

impl Selectors {
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(Selectors {
            title: compile("title")?,
            ingredients: with_class("ul", &config.ingredients_class)?,
            details_content: with_class("div", &config.details_content_class)?,
            details_label: with_class("div", &config.details_label_class)?,
            details_value_class: identifier(&config.details_value_class)?.to_string(),
            reviews: with_id("div", &config.reviews_id)?,
            rating: with_id("div", &config.rating_id)?,
            nutrition_table: with_class("table", &config.nutrition_class)?,
            row: compile("tr")?,
            cell: compile("td")?,
            date: with_class("div", &config.date_class)?,
            breadcrumb: with_class("ul", &config.category_class)?,
            list_item: compile("li")?,
            date_prefixes: config.date_prefixes.clone(),
        })
    }
}

/// All text below `element`, trimmed
pub(crate) fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collapses runs of whitespace into single spaces
pub(crate) fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

type ExtractFn = fn(&Page, &Selectors) -> Result<FieldValue, ScrapeError>;

fn extractor_for(field: Field) -> ExtractFn {
    match field {
        Field::Title => |page, s| title(page.document(), s).map(FieldValue::Text),
        Field::Ingredients => |page, s| Ok(FieldValue::List(ingredients(page.document(), s))),
        Field::Details => |page, s| details(page.document(), s).map(FieldValue::Details),
        Field::Reviews => |page, s| reviews(page.document(), s).map(FieldValue::Reviews),
        Field::Rating => |page, s| rating(page.document(), s).map(FieldValue::Rating),
        Field::Nutrition => |page, s| nutrition(page.document(), s).map(FieldValue::Nutrition),
        Field::Published => |page, s| published(page.document(), s).map(FieldValue::Text),
        Field::Category => |page, s| categories(page.document(), s).map(FieldValue::List),
        Field::Link => |page, _| Ok(FieldValue::Text(page.url().to_string())),
    }
}

/// Runs the extractor belonging to each [`Field`] against a page
pub struct RecipeExtractor {
    selectors: Selectors,
}

impl RecipeExtractor {
    pub fn new(config: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(RecipeExtractor {
            selectors: Selectors::from_config(config)?,
        })
    }

    pub fn extract(&self, field: Field, page: &Page) -> Result<FieldValue, ScrapeError> {
        extractor_for(field)(page, &self.selectors)
    }

    /// Ingredient lines of the page; empty for anything that is not a recipe
    pub fn ingredients(&self, page: &Page) -> Vec<String> {
        ingredients(page.document(), &self.selectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RecipeExtractor {
        RecipeExtractor::new(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn test_link_is_the_page_url() {
        let page = Page::parse("https://example.com/recipe/1", "<html></html>");
        let value = extractor().extract(Field::Link, &page).unwrap();
        assert_eq!(value, FieldValue::Text("https://example.com/recipe/1".into()));
    }

    #[test]
    fn test_dispatch_by_field() {
        let page = Page::parse(
            "https://example.com/recipe/1",
            "<html><head><title> Banana Bread </title></head><body></body></html>",
        );
        let extractor = extractor();
        assert_eq!(
            extractor.extract(Field::Title, &page).unwrap(),
            FieldValue::Text("Banana Bread".into())
        );
        assert_eq!(
            extractor.extract(Field::Rating, &page).unwrap(),
            FieldValue::Rating(None)
        );
        assert!(matches!(
            extractor.extract(Field::Details, &page),
            Err(ScrapeError::MissingMarkupElement(_))
        ));
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let config = SelectorConfig {
            ingredients_class: "not a[class".to_string(),
            ..SelectorConfig::default()
        };
        assert!(matches!(
            RecipeExtractor::new(&config),
            Err(ScrapeError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_class_and_id_must_be_plain_identifiers() {
        for bad in ["", "a b", "list>li", "x.y", "x#y", "x[y]", "1st", "-9", "a,b"] {
            assert!(
                matches!(identifier(bad), Err(ScrapeError::InvalidSelector(_))),
                "accepted {bad:?}"
            );
        }
        for good in ["mntl-structured-ingredients__list", "_x", "-x", "--custom", "a1"] {
            assert_eq!(identifier(good).unwrap(), good);
        }

        let config = SelectorConfig {
            rating_id: "rating bar".to_string(),
            ..SelectorConfig::default()
        };
        assert!(matches!(
            Selectors::from_config(&config),
            Err(ScrapeError::InvalidSelector(_))
        ));
        let config = SelectorConfig {
            details_value_class: "value.extra".to_string(),
            ..SelectorConfig::default()
        };
        assert!(matches!(
            Selectors::from_config(&config),
            Err(ScrapeError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_squash_whitespace() {
        assert_eq!(squash_whitespace("  1 \n cup\tflour "), "1 cup flour");
    }
}
