use thiserror::Error;

/// Errors raised while converting a duration expression to minutes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// A unit token outside of day/hour/min and their plural forms
    #[error("Invalid time unit: {0}")]
    InvalidUnit(String),

    /// The input does not consist of `<integer> <unit>` pairs
    #[error("Malformed duration: {0:?}")]
    MalformedDuration(String),

    /// The quantity half of a pair is not an integer
    #[error("Invalid quantity in duration: {0}")]
    InvalidQuantity(String),
}

/// Errors that can occur while fetching a page or extracting one of its fields
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Failed to fetch the page
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// An expected container or node is absent from the document
    #[error("Missing markup element: {0}")]
    MissingMarkupElement(String),

    /// A nutrition table row without both an amount and a label cell
    #[error("Malformed nutrition row: {0:?}")]
    MalformedNutritionRow(String),

    /// A node was found but its text could not be turned into the field's type
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// A time detail could not be converted to minutes
    #[error("Duration error: {0}")]
    Duration(#[from] DurationError),

    /// A configured class or id does not form a valid CSS selector
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Errors from the SQLite persistence layer
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The field mapping cannot be written as a recipe
    #[error("Recipe cannot be persisted: {0}")]
    RecipeNotPersistable(String),
}

/// Errors talking to the text inference service
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with an error payload
    #[error("Inference API error: {0}")]
    Api(String),

    /// The reply carried no completion text
    #[error("Inference reply has no content")]
    MissingContent,

    #[error("Provider '{0}' is not enabled in configuration")]
    ProviderDisabled(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("No API key configured for provider '{0}'")]
    MissingApiKey(String),
}

/// Errors that abort an ingredient normalization run
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Error processing ingredient entry {entry_id}: {source}")]
    Inference {
        entry_id: i64,
        #[source]
        source: InferenceError,
    },

    /// The inference reply is not the structured document we asked for
    #[error("Unparseable inference reply for ingredient entry {entry_id}: {reason}")]
    InferenceParseError { entry_id: i64, reason: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Top level error for a harvest or normalization run
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger setup failed: {0}")]
    Logger(String),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
