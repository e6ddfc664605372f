use log::info;
use serde::{Deserialize, Serialize};

use crate::model::Recipe;

/// Result of saving a recipe to favorites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadySaved,
    /// Recipes without ingredient data cannot be saved
    MissingIngredients,
}

/// A user's saved recipes, unique by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    recipes: Vec<Recipe>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.recipes.iter().any(|recipe| recipe.id == id)
    }

    pub fn save(&mut self, recipe: Recipe) -> SaveOutcome {
        if !recipe.has_ingredients() {
            return SaveOutcome::MissingIngredients;
        }
        if self.is_favorite(&recipe.id) {
            return SaveOutcome::AlreadySaved;
        }
        info!("Saved '{}' to favorites", recipe.title);
        self.recipes.push(recipe);
        SaveOutcome::Saved
    }

    pub fn remove(&mut self, id: &str) -> Option<Recipe> {
        let index = self.recipes.iter().position(|recipe| recipe.id == id)?;
        Some(self.recipes.remove(index))
    }
}
