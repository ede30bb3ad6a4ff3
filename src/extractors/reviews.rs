use super::{element_text, Selectors};
use crate::error::ScrapeError;
use crate::model::Reviews;
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

/// Number of reviews; [`Reviews::NoReviews`] when the node has no digits
pub fn reviews(document: &Html, selectors: &Selectors) -> Result<Reviews, ScrapeError> {
    let text = document
        .select(&selectors.reviews)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::MissingMarkupElement("review count".to_string()))?;

    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Ok(Reviews::NoReviews);
    }
    digits
        .parse()
        .map(Reviews::Count)
        .map_err(|_| ScrapeError::InvalidValue {
            field: "reviews",
            value: text,
        })
}

/// Recipe rating, or `None` for a page without a rating node
pub fn rating(document: &Html, selectors: &Selectors) -> Result<Option<f64>, ScrapeError> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let number = NUMBER.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

    let Some(node) = document.select(&selectors.rating).next() else {
        return Ok(None);
    };
    let text = element_text(node);
    number
        .find(&text)
        .and_then(|m| m.as_str().parse().ok())
        .map(Some)
        .ok_or(ScrapeError::InvalidValue {
            field: "rating",
            value: text,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;

    fn selectors() -> Selectors {
        Selectors::from_config(&SelectorConfig::default()).unwrap()
    }

    fn reviews_of(text: &str) -> Result<Reviews, ScrapeError> {
        let html = format!(
            r#"<div id="mntl-recipe-review-bar__comment-count_1-0">{text}</div>"#
        );
        reviews(&Html::parse_document(&html), &selectors())
    }

    fn rating_of(text: &str) -> Result<Option<f64>, ScrapeError> {
        let html = format!(r#"<div id="mntl-recipe-review-bar__rating_1-0">{text}</div>"#);
        rating(&Html::parse_document(&html), &selectors())
    }

    #[test]
    fn test_review_count_digits() {
        assert_eq!(reviews_of("1,234 Reviews").unwrap(), Reviews::Count(1234));
        assert_eq!(reviews_of("7 Reviews").unwrap(), Reviews::Count(7));
    }

    #[test]
    fn test_review_count_out_of_range() {
        assert!(matches!(
            reviews_of("99999999999999999999 Reviews"),
            Err(ScrapeError::InvalidValue { field: "reviews", .. })
        ));
    }

    #[test]
    fn test_no_reviews_sentinel() {
        assert_eq!(reviews_of("Be the first to review").unwrap(), Reviews::NoReviews);
    }

    #[test]
    fn test_missing_review_node() {
        let result = reviews(&Html::parse_document("<div></div>"), &selectors());
        assert!(matches!(result, Err(ScrapeError::MissingMarkupElement(_))));
    }

    #[test]
    fn test_rating_first_number() {
        assert_eq!(rating_of(" 4.7 (321) ").unwrap(), Some(4.7));
        assert_eq!(rating_of("5").unwrap(), Some(5.0));
    }

    #[test]
    fn test_absent_rating_is_none_not_zero() {
        let rating = rating(&Html::parse_document("<div></div>"), &selectors()).unwrap();
        assert_eq!(rating, None);
    }

    #[test]
    fn test_rating_without_number() {
        assert!(matches!(
            rating_of("not rated"),
            Err(ScrapeError::InvalidValue { field: "rating", .. })
        ));
    }
}
