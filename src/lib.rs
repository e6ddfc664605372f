pub mod builder;
pub mod config;
pub mod discover;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod freshness;
pub mod matcher;
pub mod model;
pub mod pantry;
pub mod priority;
pub mod providers;
pub mod scrape;
pub mod search;
pub mod store;
pub mod suggest;

use log::debug;

pub use builder::{FoundRecipe, RecipeFinder, RecipeFinderBuilder, RecipeInput};
pub use discover::{discover, ActiveView, AnnotatedRecipe, DiscoverRequest};
pub use error::FinderError;
pub use favorites::{Favorites, SaveOutcome};
pub use filter::{ExcludedIngredient, FilterCriteria, RecipeFilter};
pub use freshness::{Clock, FixedClock, Freshness, SystemClock};
pub use matcher::IngredientBreakdown;
pub use model::{Recipe, TagField};
pub use pantry::{AddOutcome, Pantry, PantryEntry};
pub use suggest::{IngredientSuggester, Suggestion};

use crate::config::{AppConfig, ScraperConfig};
use crate::providers::{ChatRequest, ProviderFactory};
use crate::scrape::Scraper;

/// Scrape a single recipe page with default settings
pub async fn scrape_recipe(url: &str) -> Result<Recipe, FinderError> {
    let scraper = Scraper::new(&ScraperConfig::default())?;
    let recipe = scraper.scrape_url(url).await?;
    debug!("{:#?}", recipe);
    Ok(recipe)
}

/// Ask a language model for a recipe idea.
///
/// Uses `provider_name` from the loaded configuration, or the configured
/// default provider. The request is validated before any configuration is
/// read, so an empty pantry with no message fails without network access.
pub async fn ask_for_recipe(
    message: Option<&str>,
    pantry: &Pantry,
    provider_name: Option<&str>,
    today: chrono::NaiveDate,
) -> Result<String, FinderError> {
    let request = ChatRequest::new(message, pantry, today)?;
    let config = AppConfig::load()?;
    let provider = match provider_name {
        Some(name) => ProviderFactory::get_provider(&config, name)?,
        None => ProviderFactory::get_default_provider(&config)?,
    };
    debug!("Asking {} for a recipe", provider.provider_name());
    provider.suggest(&request).await
}
