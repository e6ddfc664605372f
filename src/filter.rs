//! The recipe filter pipeline.
//!
//! Every active criterion becomes a [`RecipePredicate`]; a recipe survives
//! the pipeline only if all predicates accept it. Empty criteria add no
//! predicate at all.

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FinderError;
use crate::matcher;
use crate::model::{Recipe, TagField};
use crate::pantry::{normalize_name, Pantry};

/// Criteria for a single search invocation. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub diet: String,
    /// Dish type, e.g. "main course"
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cuisine: String,
    /// A blank value deserializes to `None`
    #[serde(default, deserialize_with = "blank_exclusion_as_none")]
    pub exclude: Option<ExcludedIngredient>,
    /// Re-apply the filters to the favorites view instead of showing every favorite
    #[serde(default)]
    pub filter_favorites: bool,
    #[serde(default)]
    pub prioritize_expiring: bool,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = diet.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    pub fn exclude(mut self, ingredient: impl Into<String>) -> Self {
        self.exclude = ExcludedIngredient::new(&ingredient.into());
        self
    }

    pub fn filter_favorites(mut self, enabled: bool) -> Self {
        self.filter_favorites = enabled;
        self
    }

    pub fn prioritize_expiring(mut self, enabled: bool) -> Self {
        self.prioritize_expiring = enabled;
        self
    }
}

/// The ingredient chosen in the exclusion selector.
///
/// Holds the ingredient name itself; pantry names are unique so no index
/// suffix is needed to tell options apart. Deserialized values are
/// normalized the same way as [`ExcludedIngredient::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExcludedIngredient(String);

impl ExcludedIngredient {
    /// Returns `None` for a blank name
    pub fn new(name: &str) -> Option<Self> {
        let name = normalize_name(name);
        if name.is_empty() {
            None
        } else {
            Some(ExcludedIngredient(name))
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExcludedIngredient {
    type Error = FinderError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(&name).ok_or(FinderError::EmptyIngredientName)
    }
}

impl From<ExcludedIngredient> for String {
    fn from(excluded: ExcludedIngredient) -> Self {
        excluded.0
    }
}

fn blank_exclusion_as_none<'de, D>(deserializer: D) -> Result<Option<ExcludedIngredient>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.as_deref().and_then(ExcludedIngredient::new))
}

/// A single yes/no test applied to a recipe
pub trait RecipePredicate {
    fn name(&self) -> &'static str;
    fn accepts(&self, recipe: &Recipe) -> bool;
}

/// At least one recipe ingredient is covered by the pantry (or the pantry is empty)
pub struct PantryMatch<'a> {
    pantry: &'a Pantry,
}

impl<'a> PantryMatch<'a> {
    pub fn new(pantry: &'a Pantry) -> Self {
        PantryMatch { pantry }
    }
}

impl RecipePredicate for PantryMatch<'_> {
    fn name(&self) -> &'static str {
        "pantry"
    }

    fn accepts(&self, recipe: &Recipe) -> bool {
        matcher::matches_pantry(recipe, self.pantry)
    }
}

/// Which tag field a [`TagMatch`] looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Diet,
    Category,
    Cuisine,
}

impl TagKind {
    fn field<'r>(&self, recipe: &'r Recipe) -> Option<&'r TagField> {
        match self {
            TagKind::Diet => recipe.diet.as_ref(),
            TagKind::Category => recipe.category.as_ref(),
            TagKind::Cuisine => recipe.cuisine.as_ref(),
        }
    }
}

/// Some value of the tag field contains the needle, ignoring case.
/// Recipes without the field never match.
pub struct TagMatch {
    kind: TagKind,
    needle: String,
}

impl TagMatch {
    pub fn new(kind: TagKind, needle: &str) -> Self {
        TagMatch {
            kind,
            needle: needle.trim().to_lowercase(),
        }
    }
}

impl RecipePredicate for TagMatch {
    fn name(&self) -> &'static str {
        match self.kind {
            TagKind::Diet => "diet",
            TagKind::Category => "category",
            TagKind::Cuisine => "cuisine",
        }
    }

    fn accepts(&self, recipe: &Recipe) -> bool {
        self.kind
            .field(recipe)
            .map(|field| field.contains_ignore_case(&self.needle))
            .unwrap_or(false)
    }
}

/// Rejects recipes with any ingredient containing the excluded name.
/// Recipes without ingredient data are never rejected.
pub struct Excludes {
    needle: String,
}

impl Excludes {
    pub fn new(excluded: &ExcludedIngredient) -> Self {
        Excludes {
            needle: excluded.name().to_string(),
        }
    }
}

impl RecipePredicate for Excludes {
    fn name(&self) -> &'static str {
        "exclude"
    }

    fn accepts(&self, recipe: &Recipe) -> bool {
        !recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(&self.needle))
    }
}

/// AND-composition of predicates
#[derive(Default)]
pub struct RecipeFilter<'a> {
    predicates: Vec<Box<dyn RecipePredicate + 'a>>,
}

impl<'a> RecipeFilter<'a> {
    pub fn new() -> Self {
        RecipeFilter {
            predicates: Vec::new(),
        }
    }

    /// Build the pipeline for the given criteria and pantry
    pub fn from_criteria(criteria: &FilterCriteria, pantry: &'a Pantry) -> Self {
        let mut filter = RecipeFilter::new();

        if !pantry.is_empty() {
            filter = filter.with(PantryMatch::new(pantry));
        }

        let tags = [
            (TagKind::Diet, &criteria.diet),
            (TagKind::Category, &criteria.category),
            (TagKind::Cuisine, &criteria.cuisine),
        ];
        for (kind, needle) in tags {
            if !needle.trim().is_empty() {
                filter = filter.with(TagMatch::new(kind, needle));
            }
        }

        if let Some(excluded) = &criteria.exclude {
            filter = filter.with(Excludes::new(excluded));
        }

        debug!("Filter pipeline: {:?}", filter.active());
        filter
    }

    pub fn with<P>(mut self, predicate: P) -> Self
    where
        P: RecipePredicate + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Names of the active predicates, in evaluation order
    pub fn active(&self) -> Vec<&'static str> {
        self.predicates.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        self.predicates.iter().all(|p| p.accepts(recipe))
    }

    /// Keep the recipes every predicate accepts, in input order
    pub fn apply<'r, I>(&self, recipes: I) -> Vec<&'r Recipe>
    where
        I: IntoIterator<Item = &'r Recipe>,
    {
        recipes.into_iter().filter(|r| self.accepts(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::PantryEntry;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn recipes() -> Vec<Recipe> {
        vec![
            Recipe::new("1", "Carbonara")
                .with_ingredients(["spaghetti", "eggs", "parmesan", "pepper"])
                .with_cuisine(vec!["Italian"])
                .with_diet("vegetarian")
                .with_category("main course"),
            Recipe::new("2", "Stir Fry")
                .with_ingredients(["broccoli", "carrot", "tofu", "soy sauce"])
                .with_cuisine(vec!["Chinese"])
                .with_diet("vegan")
                .with_category("main course"),
            Recipe::new("3", "French Toast")
                .with_ingredients(["bread", "eggs", "milk", "cinnamon"])
                .with_cuisine(vec!["French"])
                .with_diet(vec!["vegetarian", "Dairy Free?"])
                .with_category("breakfast"),
            Recipe::new("4", "No Data"),
        ]
    }

    fn ids(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_no_criteria_keeps_everything() {
        let pantry = Pantry::new();
        let all = recipes();
        let filter = RecipeFilter::from_criteria(&FilterCriteria::new(), &pantry);
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&all).len(), 4);
    }

    #[test]
    fn test_tag_filters_are_substring_and_case_insensitive() {
        let pantry = Pantry::new();
        let all = recipes();

        let filter = RecipeFilter::from_criteria(&FilterCriteria::new().diet("VEGET"), &pantry);
        assert_eq!(ids(&filter.apply(&all)), vec!["1", "3"]);

        let filter =
            RecipeFilter::from_criteria(&FilterCriteria::new().category("main"), &pantry);
        assert_eq!(ids(&filter.apply(&all)), vec!["1", "2"]);

        let filter =
            RecipeFilter::from_criteria(&FilterCriteria::new().cuisine("french"), &pantry);
        assert_eq!(ids(&filter.apply(&all)), vec!["3"]);
    }

    #[test]
    fn test_exclusion_keeps_recipes_without_ingredients() {
        let pantry = Pantry::new();
        let all = recipes();
        let filter = RecipeFilter::from_criteria(&FilterCriteria::new().exclude("Eggs"), &pantry);
        assert_eq!(ids(&filter.apply(&all)), vec!["2", "4"]);
    }

    #[test]
    fn test_pantry_match() {
        let pantry = Pantry::from(vec![PantryEntry::new("tofu", today()).unwrap()]);
        let all = recipes();
        let filter = RecipeFilter::from_criteria(&FilterCriteria::new(), &pantry);
        assert_eq!(filter.active(), vec!["pantry"]);
        assert_eq!(ids(&filter.apply(&all)), vec!["2"]);
    }

    #[test]
    fn test_and_composition_is_order_independent() {
        let pantry = Pantry::new();
        let all = recipes();
        let both = RecipeFilter::from_criteria(
            &FilterCriteria::new().diet("vegetarian").category("main"),
            &pantry,
        );
        let diet_first = RecipeFilter::new().with(TagMatch::new(TagKind::Diet, "vegetarian"));
        let category_then = RecipeFilter::new().with(TagMatch::new(TagKind::Category, "main"));

        let staged = category_then.apply(diet_first.apply(&all));
        let reversed = diet_first.apply(category_then.apply(&all));
        assert_eq!(ids(&both.apply(&all)), ids(&staged));
        assert_eq!(ids(&staged), ids(&reversed));
        assert_eq!(ids(&staged), vec!["1"]);
    }

    #[test]
    fn test_deserialized_exclusion_is_normalized() {
        let pantry = Pantry::new();
        let all = recipes();
        let criteria: FilterCriteria = serde_json::from_str(r#"{"exclude": "  Eggs "}"#).unwrap();
        assert_eq!(criteria, FilterCriteria::new().exclude("eggs"));
        assert_eq!(criteria.exclude.as_ref().unwrap().name(), "eggs");

        let filter = RecipeFilter::from_criteria(&criteria, &pantry);
        assert_eq!(ids(&filter.apply(&all)), vec!["2", "4"]);
    }

    #[test]
    fn test_blank_or_missing_exclusion_deserializes_to_none() {
        let pantry = Pantry::new();
        let all = recipes();
        for json in [r#"{"exclude": ""}"#, r#"{"exclude": "   "}"#, r#"{"exclude": null}"#, "{}"] {
            let criteria: FilterCriteria = serde_json::from_str(json).unwrap();
            assert_eq!(criteria.exclude, None, "{json}");

            let filter = RecipeFilter::from_criteria(&criteria, &pantry);
            assert!(filter.is_empty());
            assert_eq!(filter.apply(&all).len(), 4);
        }
    }

    #[test]
    fn test_excluded_ingredient_rejects_blank_on_its_own() {
        let excluded: ExcludedIngredient = serde_json::from_str(r#""Milk""#).unwrap();
        assert_eq!(excluded.name(), "milk");
        assert_eq!(serde_json::to_string(&excluded).unwrap(), r#""milk""#);
        assert!(serde_json::from_str::<ExcludedIngredient>(r#"" ""#).is_err());
    }

    #[test]
    fn test_exclusion_keeps_dashed_names_whole() {
        let criteria = FilterCriteria::new().exclude("Semi-Skimmed Milk");
        assert_eq!(criteria.exclude.unwrap().name(), "semi-skimmed milk");
    }
}
