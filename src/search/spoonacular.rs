use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{RecipeSource, SearchQuery};
use crate::config::SearchConfig;
use crate::error::FinderError;
use crate::model::{Recipe, TagField};

/// Cuisines accepted by the Spoonacular complex search
pub const VALID_CUISINES: &[&str] = &[
    "African",
    "American",
    "British",
    "Cajun",
    "Caribbean",
    "Chinese",
    "Eastern European",
    "European",
    "French",
    "German",
    "Greek",
    "Indian",
    "Irish",
    "Italian",
    "Japanese",
    "Jewish",
    "Korean",
    "Latin American",
    "Mediterranean",
    "Mexican",
    "Middle Eastern",
    "Nordic",
    "Southern",
    "Spanish",
    "Thai",
    "Vietnamese",
];

pub struct SpoonacularSource {
    client: Client,
    api_key: String,
    base_url: String,
    results: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SpoonacularRecipe>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpoonacularRecipe {
    id: serde_json::Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    cuisines: Vec<String>,
    #[serde(default)]
    dish_types: Vec<String>,
    #[serde(default)]
    diets: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    #[serde(default)]
    original: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

fn tags(values: Vec<String>) -> Option<TagField> {
    if values.is_empty() {
        None
    } else {
        Some(TagField::Multiple(values))
    }
}

impl From<SpoonacularRecipe> for Recipe {
    fn from(item: SpoonacularRecipe) -> Self {
        Recipe {
            id: match item.id {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            },
            title: item.title.unwrap_or_default(),
            image: item.image.unwrap_or_default(),
            source_url: item.source_url.unwrap_or_default(),
            ingredients: item
                .extended_ingredients
                .into_iter()
                .filter_map(|ing| ing.original.or(ing.name))
                .collect(),
            instructions: Vec::new(),
            cuisine: tags(item.cuisines),
            category: tags(item.dish_types),
            diet: tags(item.diets),
        }
    }
}

impl SpoonacularSource {
    pub fn new(config: &SearchConfig, timeout: Duration) -> Result<Self, FinderError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .spoonacular_api_key
            .clone()
            .or_else(|| std::env::var("SPOON_KEY").ok())
            .ok_or_else(|| FinderError::MissingApiKey("SPOON_KEY".to_string()))?;

        Ok(SpoonacularSource {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: config.spoonacular_base_url.trim_end_matches('/').to_string(),
            results: config.results,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularSource {
            client: Client::new(),
            api_key,
            base_url,
            results: 10,
        }
    }

    fn params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("number", self.results.to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("fillIngredients", "true".to_string()),
            ("apiKey", self.api_key.clone()),
        ];

        let include = query.ingredient_list();
        if !include.is_empty() {
            params.push(("includeIngredients", include));
        }
        if !query.exclude.is_empty() {
            params.push(("excludeIngredients", query.exclude.join(",")));
        }
        if let Some(cuisine) = &query.cuisine {
            params.push(("cuisine", cuisine.clone()));
        }
        if !query.intolerances.is_empty() {
            params.push(("intolerances", query.intolerances.join(",")));
        }
        if let Some(diet) = &query.diet {
            params.push(("diet", diet.clone()));
        }
        if let Some(category) = &query.category {
            params.push(("type", category.clone()));
        }
        params
    }
}

#[async_trait]
impl RecipeSource for SpoonacularSource {
    fn source_name(&self) -> &str {
        "spoonacular"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, FinderError> {
        if let Some(cuisine) = &query.cuisine {
            if !VALID_CUISINES.contains(&cuisine.as_str()) {
                return Err(FinderError::InvalidCuisine(cuisine.clone()));
            }
        }

        let response = self
            .client
            .get(format!("{}/recipes/complexSearch", self.base_url))
            .query(&self.params(query))
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        debug!("Spoonacular returned {} results", body.results.len());

        // The API treats cuisine as a hint; keep only exact cuisine matches
        let results: Vec<Recipe> = body
            .results
            .into_iter()
            .filter(|item| match &query.cuisine {
                Some(cuisine) => item.cuisines.contains(cuisine),
                None => true,
            })
            .map(Recipe::from)
            .collect();

        info!("Spoonacular search yielded {} recipes", results.len());
        Ok(results)
    }
}
