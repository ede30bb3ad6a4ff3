mod normalize;
mod scrape;

pub use normalize::{parse_reply, IngredientNormalizer, NormalizeSummary};
pub use scrape::{RecipeScraper, ScrapeSummary};
