use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A diet, category or cuisine field.
///
/// Upstream sources send these either as a single string or as a list of
/// strings, so both shapes are kept and matched through [`TagField::any_matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    Single(String),
    Multiple(Vec<String>),
}

impl TagField {
    /// Returns true if any of the tag values satisfies `predicate`
    pub fn any_matches<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        match self {
            TagField::Single(value) => predicate(value),
            TagField::Multiple(values) => values.iter().any(|value| predicate(value)),
        }
    }

    /// Case-insensitive substring match of `needle` against every tag value
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.any_matches(|value| value.to_lowercase().contains(&needle))
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            TagField::Single(value) => vec![value.as_str()],
            TagField::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TagField::Single(value) => value.trim().is_empty(),
            TagField::Multiple(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }

    /// Builds a tag field from an arbitrary JSON value, dropping anything
    /// that is neither a string nor a list of strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        let field = match value {
            Value::String(s) => TagField::Single(s.clone()),
            Value::Array(items) => TagField::Multiple(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect(),
            ),
            _ => return None,
        };

        if field.is_empty() {
            None
        } else {
            Some(field)
        }
    }
}

impl From<&str> for TagField {
    fn from(value: &str) -> Self {
        TagField::Single(value.to_string())
    }
}

impl From<Vec<&str>> for TagField {
    fn from(values: Vec<&str>) -> Self {
        TagField::Multiple(values.into_iter().map(String::from).collect())
    }
}

/// A recipe as returned by a search source, saved as a favorite, or scraped
/// into the local archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_url: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub ingredients: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "lenient_list"
    )]
    pub instructions: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_tag"
    )]
    pub cuisine: Option<TagField>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_tag"
    )]
    pub category: Option<TagField>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_tag"
    )]
    pub diet: Option<TagField>,
}

impl Recipe {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Recipe {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<TagField>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<TagField>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_diet(mut self, diet: impl Into<TagField>) -> Self {
        self.diet = Some(diet.into());
        self
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients.is_empty()
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

// Anything other than an array is treated as "no data".
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_tag<'de, D>(deserializer: D) -> Result<Option<TagField>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(TagField::from_json(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_field_single_and_multiple() {
        let single = TagField::from("Main Course");
        assert!(single.contains_ignore_case("main"));
        assert!(!single.contains_ignore_case("dessert"));

        let multiple = TagField::from(vec!["vegan", "Gluten Free"]);
        assert!(multiple.contains_ignore_case("gluten"));
        assert_eq!(multiple.values(), vec!["vegan", "Gluten Free"]);
    }

    #[test]
    fn test_recipe_with_missing_fields() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 42, "title": "Toast"}"#).unwrap();
        assert_eq!(recipe.id, "42");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.cuisine.is_none());
    }

    #[test]
    fn test_recipe_with_malformed_fields() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "id": "7",
                "title": "Odd",
                "ingredients": "salt",
                "cuisine": 12,
                "category": ["Dinner", 3],
                "diet": null
            }"#,
        )
        .unwrap();

        assert!(recipe.ingredients.is_empty());
        assert!(recipe.cuisine.is_none());
        assert_eq!(recipe.category, Some(TagField::Multiple(vec!["Dinner".into()])));
        assert!(recipe.diet.is_none());
    }

    #[test]
    fn test_empty_tags_are_dropped() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": "1", "cuisine": [], "diet": ""}"#).unwrap();
        assert!(recipe.cuisine.is_none());
        assert!(recipe.diet.is_none());
    }
}
