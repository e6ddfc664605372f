mod mock;
mod sequencer;
mod spoonacular;
mod tasty;

pub use mock::MockSource;
pub use sequencer::{SearchSequencer, SearchTicket};
pub use spoonacular::{SpoonacularSource, VALID_CUISINES};
pub use tasty::TastySource;

use async_trait::async_trait;
use std::time::Duration;

use crate::config::{SearchBackend, SearchConfig};
use crate::error::FinderError;
use crate::model::Recipe;

/// Parameters of a single upstream recipe search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Ingredients the recipes should include
    pub ingredients: Vec<String>,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    /// Dish type, e.g. "main course"
    pub category: Option<String>,
    pub exclude: Vec<String>,
    pub intolerances: Vec<String>,
}

impl SearchQuery {
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchQuery {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = non_blank(cuisine.into());
        self
    }

    pub fn diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = non_blank(diet.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(category.into());
        self
    }

    pub fn exclude(mut self, ingredient: impl Into<String>) -> Self {
        if let Some(ingredient) = non_blank(ingredient.into()) {
            self.exclude.push(ingredient);
        }
        self
    }

    /// Comma separated ingredient list as expected by the search APIs
    pub fn ingredient_list(&self) -> String {
        self.ingredients
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// An upstream service returning recipes for a query
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g. "spoonacular")
    fn source_name(&self) -> &str;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, FinderError>;
}

/// Create the configured search source
pub fn source_from_config(config: &SearchConfig) -> Result<Box<dyn RecipeSource>, FinderError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match config.source {
        SearchBackend::Spoonacular => Ok(Box::new(SpoonacularSource::new(config, timeout)?)),
        SearchBackend::Tasty => Ok(Box::new(TastySource::new(config, timeout)?)),
        SearchBackend::Mock => Ok(Box::new(MockSource)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder_skips_blank_values() {
        let query = SearchQuery::new(["chicken", " ", "rice "])
            .cuisine("  ")
            .diet("vegan")
            .exclude("");

        assert_eq!(query.ingredient_list(), "chicken,rice");
        assert!(query.cuisine.is_none());
        assert_eq!(query.diet.as_deref(), Some("vegan"));
        assert!(query.exclude.is_empty());
    }

    #[test]
    fn test_mock_source_from_config() {
        let config = SearchConfig {
            source: SearchBackend::Mock,
            ..Default::default()
        };
        let source = source_from_config(&config).unwrap();
        assert_eq!(source.source_name(), "mock");
    }
}
