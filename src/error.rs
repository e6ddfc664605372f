use thiserror::Error;

/// Errors that can occur while managing a pantry or talking to collaborators
#[derive(Error, Debug)]
pub enum FinderError {
    /// Ingredient name was empty after trimming
    #[error("Ingredient name cannot be empty")]
    EmptyIngredientName,

    /// Expiration date could not be parsed
    #[error("Invalid expiration date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Failed to reach an upstream service
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Upstream answered with something we could not interpret
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Filesystem failure while reading or writing an archive
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Cuisine is not supported by the recipe search service
    #[error("Invalid cuisine type provided: {0}")]
    InvalidCuisine(String),

    /// API key was not found in configuration or environment
    #[error("{0} not found in config or environment")]
    MissingApiKey(String),

    /// Requested provider name is not known
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Provider exists but is switched off in configuration
    #[error("Provider '{0}' is not enabled in configuration")]
    ProviderDisabled(String),

    /// Provider answered but the reply could not be used
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Suggestion request had nothing to work with
    #[error("{0}")]
    EmptyChatRequest(String),

    /// Builder was given an incomplete or contradictory set of options
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
