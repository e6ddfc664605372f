//! Matching free-text recipe ingredients against pantry entries.
//!
//! A recipe ingredient such as "2 cups shredded cheddar cheese" is satisfied
//! by a pantry entry when either text contains the other, ignoring case.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::Recipe;
use crate::pantry::{Pantry, PantryEntry};

/// Bidirectional, case-insensitive containment check.
///
/// Blank text on either side never matches.
pub fn ingredient_satisfied(recipe_ingredient: &str, pantry_name: &str) -> bool {
    let pantry_name = pantry_name.trim().to_lowercase();
    let recipe_ingredient = recipe_ingredient.trim().to_lowercase();
    // A blank recipe line would be contained in every pantry name, so it is
    // rejected as well as a blank pantry name.
    if pantry_name.is_empty() || recipe_ingredient.is_empty() {
        return false;
    }
    recipe_ingredient.contains(&pantry_name) || pantry_name.contains(&recipe_ingredient)
}

/// Pantry entries that satisfy a single recipe ingredient
pub fn matching_entries<'p>(
    recipe_ingredient: &'p str,
    pantry: &'p Pantry,
) -> impl Iterator<Item = &'p PantryEntry> + 'p {
    pantry
        .entries()
        .iter()
        .filter(move |entry| ingredient_satisfied(recipe_ingredient, entry.name()))
}

pub fn satisfied_by_pantry(recipe_ingredient: &str, pantry: &Pantry) -> bool {
    matching_entries(recipe_ingredient, pantry).next().is_some()
}

/// True when the pantry is empty, or at least one of the recipe's
/// ingredients is satisfied by at least one pantry entry.
pub fn matches_pantry(recipe: &Recipe, pantry: &Pantry) -> bool {
    pantry.is_empty()
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| satisfied_by_pantry(ingredient, pantry))
}

/// True when any pantry entry that satisfies one of the recipe's ingredients
/// is expired or expires on `today`.
pub fn uses_expiring(recipe: &Recipe, pantry: &Pantry, today: NaiveDate) -> bool {
    recipe.ingredients.iter().any(|ingredient| {
        matching_entries(ingredient, pantry).any(|entry| entry.freshness(today).is_expiring())
    })
}

/// The recipe's ingredients split into what the pantry covers and what is missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngredientBreakdown {
    pub have: Vec<String>,
    pub need: Vec<String>,
}

impl IngredientBreakdown {
    /// Recipe order is preserved in both lists
    pub fn for_recipe(recipe: &Recipe, pantry: &Pantry) -> Self {
        let (have, need): (Vec<String>, Vec<String>) = recipe
            .ingredients
            .iter()
            .cloned()
            .partition(|ingredient| satisfied_by_pantry(ingredient, pantry));
        IngredientBreakdown { have, need }
    }

    pub fn is_complete(&self) -> bool {
        self.need.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pantry(items: &[(&str, NaiveDate)]) -> Pantry {
        Pantry::from(
            items
                .iter()
                .map(|(name, expires)| PantryEntry::new(name, *expires).unwrap())
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_containment_both_ways() {
        assert!(ingredient_satisfied("cheddar cheese", "cheese"));
        assert!(ingredient_satisfied("cheese", "cheddar cheese"));
        assert!(!ingredient_satisfied("milk", "cheese"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(ingredient_satisfied("2 lb Chicken Breast", "chicken"));
    }

    #[test]
    fn test_blank_never_matches() {
        assert!(!ingredient_satisfied("salt", ""));
        assert!(!ingredient_satisfied("salt", "   "));
        assert!(!ingredient_satisfied("", "salt"));
        assert!(!ingredient_satisfied("  ", "milk"));
    }

    #[test]
    fn test_blank_recipe_line_is_needed_not_had() {
        let today = date(2024, 6, 10);
        let p = pantry(&[("milk", today)]);
        let recipe = Recipe::new("1", "Pancakes").with_ingredients(["flour", "  "]);
        assert!(!matches_pantry(&recipe, &p));
        assert!(!uses_expiring(&recipe, &p, today));
    }

    #[test]
    fn test_empty_pantry_matches_everything() {
        let empty = Pantry::new();
        assert!(matches_pantry(&Recipe::new("1", "Anything"), &empty));
        assert!(matches_pantry(
            &Recipe::new("2", "Tofu").with_ingredients(["tofu"]),
            &empty
        ));
    }

    #[test]
    fn test_recipe_without_ingredients_needs_empty_pantry() {
        let today = date(2024, 6, 10);
        let p = pantry(&[("egg", today)]);
        assert!(!matches_pantry(&Recipe::new("1", "Mystery"), &p));
    }

    #[test]
    fn test_uses_expiring_checks_every_matching_entry() {
        let today = date(2024, 6, 10);
        let p = pantry(&[("cheese", date(2024, 7, 1)), ("cheddar", today)]);
        let recipe = Recipe::new("1", "Mac").with_ingredients(["sharp cheddar cheese"]);
        assert!(uses_expiring(&recipe, &p, today));
    }

    #[test]
    fn test_uses_expiring_false_for_fresh() {
        let today = date(2024, 6, 10);
        let p = pantry(&[("rice", date(2024, 6, 20))]);
        let recipe = Recipe::new("1", "Pilaf").with_ingredients(["1 cup rice"]);
        assert!(!uses_expiring(&recipe, &p, today));
    }

    #[test]
    fn test_breakdown() {
        let p = pantry(&[("cheese", date(2024, 6, 20))]);
        let recipe = Recipe::new("1", "Pasta").with_ingredients(["cheddar cheese", "pasta"]);
        let breakdown = IngredientBreakdown::for_recipe(&recipe, &p);
        assert_eq!(breakdown.have, vec!["cheddar cheese"]);
        assert_eq!(breakdown.need, vec!["pasta"]);
        assert!(!breakdown.is_complete());
    }
}
