//! Entry point used by the presentation layer: filter, annotate and order
//! recipes for display.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterCriteria, RecipeFilter};
use crate::matcher::{self, IngredientBreakdown};
use crate::model::Recipe;
use crate::pantry::Pantry;
use crate::priority::prioritize_expiring;

/// Which collection the user is looking at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    /// Results of the latest recipe search
    #[default]
    Search,
    Favorites,
}

/// A recipe ready for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedRecipe<'a> {
    pub recipe: &'a Recipe,
    /// Some pantry entry used by this recipe is expired or expires today
    pub uses_expiring: bool,
}

impl<'a> AnnotatedRecipe<'a> {
    pub fn new(recipe: &'a Recipe, pantry: &Pantry, today: NaiveDate) -> Self {
        AnnotatedRecipe {
            recipe,
            uses_expiring: matcher::uses_expiring(recipe, pantry, today),
        }
    }

    /// Have/need split of the recipe's ingredients, computed on demand
    pub fn breakdown(&self, pantry: &Pantry) -> IngredientBreakdown {
        IngredientBreakdown::for_recipe(self.recipe, pantry)
    }
}

/// Everything the pipeline reads. Nothing here is modified.
#[derive(Debug, Clone, Copy)]
pub struct DiscoverRequest<'a> {
    pub recipes: &'a [Recipe],
    pub favorites: &'a [Recipe],
    pub pantry: &'a Pantry,
    pub criteria: &'a FilterCriteria,
    pub view: ActiveView,
    pub today: NaiveDate,
}

/// Produce the ordered display list.
///
/// In the search view the search results go through every active filter.
/// In the favorites view the favorites are shown as-is unless
/// `criteria.filter_favorites` is set, in which case the same filters apply.
pub fn discover<'a>(request: &DiscoverRequest<'a>) -> Vec<AnnotatedRecipe<'a>> {
    let DiscoverRequest {
        recipes,
        favorites,
        pantry,
        criteria,
        view,
        today,
    } = *request;

    let candidates: Vec<&'a Recipe> = match view {
        ActiveView::Search => RecipeFilter::from_criteria(criteria, pantry).apply(recipes),
        ActiveView::Favorites if criteria.filter_favorites => {
            RecipeFilter::from_criteria(criteria, pantry).apply(favorites)
        }
        ActiveView::Favorites => favorites.iter().collect(),
    };

    debug!(
        "{:?} view: {} candidates after filtering",
        view,
        candidates.len()
    );

    let annotated = candidates
        .into_iter()
        .map(|recipe| AnnotatedRecipe::new(recipe, pantry, today))
        .collect();

    prioritize_expiring(annotated, criteria.prioritize_expiring)
}
