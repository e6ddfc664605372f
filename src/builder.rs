use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;

use crate::config::SearchConfig;
use crate::discover::{discover, ActiveView, DiscoverRequest};
use crate::error::FinderError;
use crate::favorites::Favorites;
use crate::filter::FilterCriteria;
use crate::freshness::{Clock, SystemClock};
use crate::matcher::IngredientBreakdown;
use crate::model::Recipe;
use crate::pantry::Pantry;
use crate::scrape::read_archive;
use crate::search::{source_from_config, RecipeSource, SearchQuery};

/// Where the candidate recipes come from
#[derive(Debug, Clone)]
pub enum RecipeInput {
    /// A scraped archive file
    Archive(PathBuf),
    /// An upstream recipe search
    Search(SearchQuery),
    /// Recipes already in memory
    Recipes(Vec<Recipe>),
}

/// One entry of the display list
#[derive(Debug, Clone, PartialEq)]
pub struct FoundRecipe {
    pub recipe: Recipe,
    pub uses_expiring: bool,
    pub breakdown: IngredientBreakdown,
}

/// Builder for loading recipes and running them through the discovery pipeline
#[derive(Default)]
pub struct RecipeFinderBuilder {
    input: Option<RecipeInput>,
    source: Option<Box<dyn RecipeSource>>,
    search: SearchConfig,
    pantry: Pantry,
    favorites: Favorites,
    criteria: FilterCriteria,
    view: ActiveView,
    today: Option<NaiveDate>,
}

impl RecipeFinderBuilder {
    /// Read candidate recipes from an archive file
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder().archive("data/recipes.json");
    /// ```
    pub fn archive(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(RecipeInput::Archive(path.into()));
        self
    }

    /// Search an upstream service for candidate recipes
    pub fn search(mut self, query: SearchQuery) -> Self {
        self.input = Some(RecipeInput::Search(query));
        self
    }

    pub fn recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.input = Some(RecipeInput::Recipes(recipes));
        self
    }

    /// Search configuration used to pick the upstream service
    pub fn search_config(mut self, config: SearchConfig) -> Self {
        self.search = config;
        self
    }

    /// Use this source for searches instead of the configured one
    pub fn source(mut self, source: Box<dyn RecipeSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn pantry(mut self, pantry: Pantry) -> Self {
        self.pantry = pantry;
        self
    }

    pub fn favorites(mut self, favorites: Favorites) -> Self {
        self.favorites = favorites;
        self
    }

    pub fn criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Show favorites instead of the loaded recipes
    pub fn favorites_view(mut self) -> Self {
        self.view = ActiveView::Favorites;
        self
    }

    /// Pin "today" instead of reading the system clock
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Load the recipes and produce the ordered display list
    ///
    /// The favorites view never reads the recipe input, so a configured
    /// archive or search is not touched there.
    ///
    /// # Errors
    /// Returns `FinderError` if, in the search view:
    /// - No recipe input was given
    /// - The archive cannot be read or parsed
    /// - The upstream search fails
    pub async fn build(self) -> Result<Vec<FoundRecipe>, FinderError> {
        let recipes = match (self.view, self.input) {
            (ActiveView::Favorites, _) => Vec::new(),
            (ActiveView::Search, Some(RecipeInput::Archive(path))) => read_archive(&path).await?,
            (ActiveView::Search, Some(RecipeInput::Search(query))) => {
                let source = match self.source {
                    Some(source) => source,
                    None => source_from_config(&self.search)?,
                };
                info!("Searching {} for recipes", source.source_name());
                source.search(&query).await?
            }
            (ActiveView::Search, Some(RecipeInput::Recipes(recipes))) => recipes,
            (ActiveView::Search, None) => {
                return Err(FinderError::BuilderError(
                    "No recipe input specified. Use .archive(), .search() or .recipes()"
                        .to_string(),
                ))
            }
        };

        let today = self.today.unwrap_or_else(|| SystemClock.today());
        let request = DiscoverRequest {
            recipes: &recipes,
            favorites: self.favorites.recipes(),
            pantry: &self.pantry,
            criteria: &self.criteria,
            view: self.view,
            today,
        };

        Ok(discover(&request)
            .into_iter()
            .map(|annotated| FoundRecipe {
                recipe: annotated.recipe.clone(),
                uses_expiring: annotated.uses_expiring,
                breakdown: annotated.breakdown(&self.pantry),
            })
            .collect())
    }
}

/// Main entry point for the builder API
pub struct RecipeFinder;

impl RecipeFinder {
    /// Creates a new builder for finding recipes
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder();
    /// ```
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }
}
