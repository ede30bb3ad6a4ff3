use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main harvest configuration, loaded once at process start
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HarvestConfig {
    /// Where recipe links come from and how pages are fetched
    #[serde(default)]
    pub source: SourceConfig,
    /// Class and id names used by the field extractors
    #[serde(default)]
    pub selectors: SelectorConfig,
    /// Report and log file locations
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Text inference service used by the ingredient normalizer
    #[serde(default)]
    pub inference: InferenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Index page scanned for recipe links
    #[serde(default = "default_index_url")]
    pub index_url: String,
    /// Only links starting with this prefix are treated as recipe candidates
    #[serde(default = "default_recipe_prefix")]
    pub recipe_prefix: String,
    /// Explicit recipe links; when non-empty, discovery is skipped
    #[serde(default)]
    pub links: Vec<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            recipe_prefix: default_recipe_prefix(),
            links: Vec::new(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Markup hooks of the recipe pages
#[derive(Debug, Deserialize, Clone)]
pub struct SelectorConfig {
    /// Class of the `<ul>` holding ingredient lines
    #[serde(default = "default_ingredients_class")]
    pub ingredients_class: String,
    #[serde(default = "default_details_content_class")]
    pub details_content_class: String,
    #[serde(default = "default_details_label_class")]
    pub details_label_class: String,
    #[serde(default = "default_details_value_class")]
    pub details_value_class: String,
    /// Id of the review count node
    #[serde(default = "default_reviews_id")]
    pub reviews_id: String,
    /// Id of the rating node
    #[serde(default = "default_rating_id")]
    pub rating_id: String,
    #[serde(default = "default_nutrition_class")]
    pub nutrition_class: String,
    #[serde(default = "default_date_class")]
    pub date_class: String,
    /// Class of the breadcrumb `<ul>`
    #[serde(default = "default_category_class")]
    pub category_class: String,
    /// Leading phrases removed from the publish date
    #[serde(default = "default_date_prefixes")]
    pub date_prefixes: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            ingredients_class: default_ingredients_class(),
            details_content_class: default_details_content_class(),
            details_label_class: default_details_label_class(),
            details_value_class: default_details_value_class(),
            reviews_id: default_reviews_id(),
            rating_id: default_rating_id(),
            nutrition_class: default_nutrition_class(),
            date_class: default_date_class(),
            category_class: default_category_class(),
            date_prefixes: default_date_prefixes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Human readable report, truncated on each run
    #[serde(default = "default_report_path")]
    pub report_path: String,
    /// Process log, appended on each run
    #[serde(default = "default_log_path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            log_path: default_log_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub path: String,
    /// Whether scraped recipes are written to the database
    #[serde(default = "default_true")]
    pub persist: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            persist: true,
        }
    }
}

/// Configuration for the inference provider
#[derive(Debug, Deserialize, Clone)]
pub struct InferenceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Provider name, "openai" or "ollama"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

// Default value functions
fn default_index_url() -> String {
    "https://www.allrecipes.com/recipes-a-z-6735880".to_string()
}

fn default_recipe_prefix() -> String {
    "https://www.allrecipes.com/recipe/".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_ingredients_class() -> String {
    "mntl-structured-ingredients__list".to_string()
}

fn default_details_content_class() -> String {
    "mntl-recipe-details__content".to_string()
}

fn default_details_label_class() -> String {
    "mntl-recipe-details__label".to_string()
}

fn default_details_value_class() -> String {
    "mntl-recipe-details__value".to_string()
}

fn default_reviews_id() -> String {
    "mntl-recipe-review-bar__comment-count_1-0".to_string()
}

fn default_rating_id() -> String {
    "mntl-recipe-review-bar__rating_1-0".to_string()
}

fn default_nutrition_class() -> String {
    "mntl-nutrition-facts-summary__table".to_string()
}

fn default_date_class() -> String {
    "mntl-attribution__item-date".to_string()
}

fn default_category_class() -> String {
    "mntl-universal-breadcrumbs".to_string()
}

fn default_date_prefixes() -> Vec<String> {
    vec!["Published on".to_string(), "Updated on".to_string()]
}

fn default_report_path() -> String {
    "scraping.log".to_string()
}

fn default_log_path() -> String {
    "logging_info.log".to_string()
}

fn default_database_path() -> String {
    "recipes.sqlite".to_string()
}

fn default_true() -> bool {
    true
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_max_tokens() -> u32 {
    300
}

impl HarvestConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with HARVEST__ prefix
    /// 2. harvest.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: HARVEST__INFERENCE__API_KEY. Lists are
    /// comma separated: HARVEST__SOURCE__LINKS=https://a,https://b
    pub fn load() -> Result<Self, ConfigError> {
        load_config("harvest")
    }
}

fn environment() -> Environment {
    Environment::with_prefix("HARVEST")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("source.links")
}

/// Load configuration from the named file (extension optional) and the environment
pub fn load_config(file_name: &str) -> Result<HarvestConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file_name).required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "openai");
        assert_eq!(default_temperature(), 0.0);
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_report_path(), "scraping.log");
        assert_eq!(default_date_prefixes(), vec!["Published on", "Updated on"]);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config("definitely-not-a-harvest-config").unwrap();
        assert_eq!(config.output.report_path, "scraping.log");
        assert_eq!(config.database.path, "recipes.sqlite");
        assert!(config.database.persist);
        assert!(config.source.links.is_empty());
        assert_eq!(config.inference.provider, "openai");
    }

    #[test]
    fn test_environment_overrides_with_link_list() {
        let mut vars = config::Map::new();
        vars.insert(
            "HARVEST__SOURCE__LINKS".to_string(),
            "https://example.com/recipe/1,https://example.com/recipe/2".to_string(),
        );
        vars.insert("HARVEST__DATABASE__PERSIST".to_string(), "false".to_string());
        vars.insert(
            "HARVEST__SELECTORS__RATING_ID".to_string(),
            "rating-bar".to_string(),
        );

        let config: HarvestConfig = Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(
            config.source.links,
            vec!["https://example.com/recipe/1", "https://example.com/recipe/2"]
        );
        assert!(!config.database.persist);
        assert_eq!(config.selectors.rating_id, "rating-bar");
        assert!(config.selectors.date_prefixes.contains(&"Published on".to_string()));
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [database]
                path = ":memory:"

                [inference]
                provider = "ollama"
                model = "llama3"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: HarvestConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.database.path, ":memory:");
        assert!(config.database.persist);
        assert_eq!(config.inference.provider, "ollama");
        assert_eq!(config.inference.model, "llama3");
        assert_eq!(config.inference.max_tokens, 300);
        assert_eq!(config.selectors.category_class, "mntl-universal-breadcrumbs");
    }
}
