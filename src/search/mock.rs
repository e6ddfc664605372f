use async_trait::async_trait;
use log::debug;

use super::{RecipeSource, SearchQuery};
use crate::error::FinderError;
use crate::model::{Recipe, TagField};

/// Fixed set of recipes for offline development
pub struct MockSource;

impl MockSource {
    pub fn recipes() -> Vec<Recipe> {
        vec![
            Recipe::new("1", "Spaghetti Carbonara")
                .with_ingredients(["spaghetti", "eggs", "parmesan", "pepper"])
                .with_cuisine(vec!["Italian"])
                .with_diet("vegetarian")
                .with_category("main course"),
            Recipe::new("2", "Vegetable Stir Fry")
                .with_ingredients(["broccoli", "carrot", "tofu", "soy sauce"])
                .with_cuisine(vec!["Chinese"])
                .with_diet("vegan")
                .with_category("main course"),
            Recipe::new("3", "French Toast")
                .with_ingredients(["bread", "eggs", "milk", "cinnamon"])
                .with_cuisine(vec!["French"])
                .with_diet("vegetarian")
                .with_category("breakfast"),
            Recipe::new("4", "Chana Masala")
                .with_ingredients(["chickpeas", "tomato", "onion", "garam masala"])
                .with_cuisine(vec!["Indian"])
                .with_diet("vegan")
                .with_category("main course"),
        ]
        .into_iter()
        .map(|mut recipe| {
            recipe.image = format!("/images/{}.jpg", recipe.id);
            recipe
        })
        .collect()
    }
}

fn exact(field: &Option<TagField>, wanted: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => field
            .as_ref()
            .map(|f| f.any_matches(|value| value == wanted.as_str()))
            .unwrap_or(false),
    }
}

#[async_trait]
impl RecipeSource for MockSource {
    fn source_name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, FinderError> {
        let recipes: Vec<Recipe> = Self::recipes()
            .into_iter()
            .filter(|r| exact(&r.cuisine, &query.cuisine))
            .filter(|r| exact(&r.diet, &query.diet))
            .filter(|r| exact(&r.category, &query.category))
            .collect();
        debug!("Returning {} mock recipes", recipes.len());
        Ok(recipes)
    }
}
