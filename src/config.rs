use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

use crate::suggest::{DEFAULT_THRESHOLD, KNOWN_INGREDIENTS};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used for AI recipe suggestions when none is specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Upstream recipe search
    #[serde(default)]
    pub search: SearchConfig,
    /// Fuzzy ingredient suggestion
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    /// Recipe page scraper
    #[serde(default)]
    pub scraper: ScraperConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            search: SearchConfig::default(),
            suggestions: SuggestionConfig::default(),
            scraper: ScraperConfig::default(),
        }
    }
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

/// Which recipe search service to use
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    #[default]
    Spoonacular,
    Tasty,
    Mock,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default)]
    pub source: SearchBackend,
    /// Falls back to the SPOON_KEY environment variable
    pub spoonacular_api_key: Option<String>,
    /// Falls back to the TASTY_API_KEY environment variable
    pub tasty_api_key: Option<String>,
    #[serde(default = "default_spoonacular_base_url")]
    pub spoonacular_base_url: String,
    #[serde(default = "default_tasty_base_url")]
    pub tasty_base_url: String,
    /// Number of recipes requested per search
    #[serde(default = "default_results")]
    pub results: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source: SearchBackend::default(),
            spoonacular_api_key: None,
            tasty_api_key: None,
            spoonacular_base_url: default_spoonacular_base_url(),
            tasty_base_url: default_tasty_base_url(),
            results: default_results(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestionConfig {
    /// Maximum normalized edit distance for a suggestion
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Known ingredient names
    #[serde(default = "default_vocabulary")]
    pub vocabulary: Vec<String>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            vocabulary: default_vocabulary(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Category page listing the recipes to scrape
    #[serde(default = "default_category_url")]
    pub category_url: String,
    /// Archive file the scraped recipes are written to
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            category_url: default_category_url(),
            output: default_output(),
            timeout_secs: default_timeout(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_spoonacular_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_tasty_base_url() -> String {
    "https://tasty.p.rapidapi.com".to_string()
}

fn default_results() -> u32 {
    10
}

fn default_timeout() -> u64 {
    30
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_vocabulary() -> Vec<String> {
    KNOWN_INGREDIENTS.iter().map(|s| s.to_string()).collect()
}

fn default_category_url() -> String {
    "https://www.allrecipes.com/recipes/15436/everyday-cooking/one-pot-meals/".to_string()
}

fn default_output() -> String {
    "data/recipes.json".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__SEARCH__SPOONACULAR_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source order.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_FINDER__SCRAPER__OUTPUT
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
