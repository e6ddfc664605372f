use crate::discover::AnnotatedRecipe;

/// Move recipes that use expiring pantry entries to the front.
///
/// This is a stable partition: relative order inside both groups is kept.
/// With `enabled == false` the list is returned untouched.
pub fn prioritize_expiring(
    recipes: Vec<AnnotatedRecipe<'_>>,
    enabled: bool,
) -> Vec<AnnotatedRecipe<'_>> {
    if !enabled {
        return recipes;
    }

    let (mut expiring, rest): (Vec<_>, Vec<_>) =
        recipes.into_iter().partition(|r| r.uses_expiring);
    expiring.extend(rest);
    expiring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Recipe;

    fn annotate<'a>(recipes: &'a [Recipe], flags: &[bool]) -> Vec<AnnotatedRecipe<'a>> {
        recipes
            .iter()
            .zip(flags)
            .map(|(recipe, &uses_expiring)| AnnotatedRecipe {
                recipe,
                uses_expiring,
            })
            .collect()
    }

    fn ids<'a>(list: &[AnnotatedRecipe<'a>]) -> Vec<&'a str> {
        list.iter().map(|r| r.recipe.id.as_str()).collect()
    }

    #[test]
    fn test_disabled_is_identity() {
        let recipes: Vec<Recipe> = (1..=3).map(|i| Recipe::new(i.to_string(), "r")).collect();
        let sorted = prioritize_expiring(annotate(&recipes, &[false, true, false]), false);
        assert_eq!(ids(&sorted), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_stable_partition() {
        let recipes: Vec<Recipe> = (1..=5).map(|i| Recipe::new(i.to_string(), "r")).collect();
        let sorted =
            prioritize_expiring(annotate(&recipes, &[false, true, false, true, false]), true);
        assert_eq!(ids(&sorted), vec!["2", "4", "1", "3", "5"]);
    }

    #[test]
    fn test_idempotent() {
        let recipes: Vec<Recipe> = (1..=4).map(|i| Recipe::new(i.to_string(), "r")).collect();
        let once = prioritize_expiring(annotate(&recipes, &[false, true, true, false]), true);
        let twice = prioritize_expiring(once.clone(), true);
        assert_eq!(once, twice);
    }
}
