use html_escape::decode_html_entities;
use log::debug;
use scraper::Html;
use serde_json::Value;

use super::selector;
use crate::error::FinderError;
use crate::model::TagField;

/// Recipe fields recovered from a page's JSON-LD block
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JsonLdRecipe {
    pub name: Option<String>,
    pub ingredients: Vec<String>,
    pub cuisine: Option<TagField>,
    pub category: Option<TagField>,
    pub diet: Option<TagField>,
    pub image: Option<String>,
    pub instructions: Vec<String>,
}

impl JsonLdRecipe {
    pub fn from_node(node: &Value) -> Self {
        let name = node
            .get("name")
            .and_then(Value::as_str)
            .map(decode_html_symbols)
            .filter(|name| !name.trim().is_empty());

        let ingredients = match node.get("recipeIngredient") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|ing| !ing.trim().is_empty())
                .map(|ing| decode_html_symbols(ing).trim().to_string())
                .collect(),
            Some(Value::String(single)) if !single.trim().is_empty() => {
                vec![decode_html_symbols(single).trim().to_string()]
            }
            _ => Vec::new(),
        };

        let diet = node
            .get("suitableForDiet")
            .and_then(diet_field)
            .or_else(|| node.get("keywords").and_then(keyword_field));

        let mut instructions = Vec::new();
        if let Some(value) = node.get("recipeInstructions") {
            collect_instructions(value, &mut instructions);
        }

        JsonLdRecipe {
            name,
            ingredients,
            cuisine: node.get("recipeCuisine").and_then(TagField::from_json),
            category: node.get("recipeCategory").and_then(TagField::from_json),
            diet,
            image: node.get("image").and_then(first_image),
            instructions,
        }
    }
}

/// Locate the first Recipe node among the page's JSON-LD scripts.
pub fn extract(document: &Html) -> Result<Option<JsonLdRecipe>, FinderError> {
    let scripts = selector("script[type='application/ld+json']")?;

    for (index, script) in document.select(&scripts).enumerate() {
        let raw_json = script.inner_html();
        let json_ld = match serde_json::from_str::<Value>(&sanitize_json(&raw_json)) {
            Ok(value) => value,
            Err(e) => {
                debug!("JSON-LD script {} is not valid JSON: {}", index, e);
                continue;
            }
        };

        if let Some(node) = find_recipe_node(&json_ld) {
            return Ok(Some(JsonLdRecipe::from_node(node)));
        }
        debug!("JSON-LD script {} has no Recipe node", index);
    }

    Ok(None)
}

/// Search a JSON-LD document for a node typed `Recipe`: the root itself, an
/// element of a root array, or an entry of a `@graph` at either level.
pub fn find_recipe_node(json_ld: &Value) -> Option<&Value> {
    match json_ld {
        Value::Array(items) => items
            .iter()
            .find(|item| is_recipe_type(item))
            .or_else(|| items.iter().find_map(find_in_graph)),
        Value::Object(_) if is_recipe_type(json_ld) => Some(json_ld),
        Value::Object(_) => find_in_graph(json_ld),
        _ => None,
    }
}

fn find_in_graph(value: &Value) -> Option<&Value> {
    value
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|graph| graph.iter().find(|item| is_recipe_type(item)))
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn first_image(value: &Value) -> Option<String> {
    let url = match value {
        Value::String(url) => Some(url.as_str()),
        Value::Array(images) => return images.first().and_then(first_image),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str),
        _ => None,
    }?;

    let url = decode_html_symbols(url);
    if url.trim().is_empty() {
        None
    } else {
        Some(url)
    }
}

fn diet_field(value: &Value) -> Option<TagField> {
    let cleaned = match TagField::from_json(value)? {
        TagField::Single(diet) => TagField::Single(clean_diet_value(&diet)),
        TagField::Multiple(diets) => {
            TagField::Multiple(diets.iter().map(|d| clean_diet_value(d)).collect())
        }
    };
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Keywords usually arrive as one comma separated string
fn keyword_field(value: &Value) -> Option<TagField> {
    match value {
        Value::String(keywords) => {
            let words: Vec<String> = keywords
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(String::from)
                .collect();
            match words.len() {
                0 => None,
                1 => words.into_iter().next().map(TagField::Single),
                _ => Some(TagField::Multiple(words)),
            }
        }
        other => TagField::from_json(other),
    }
}

fn collect_instructions(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            let text = decode_html_symbols(text).trim().to_string();
            if !text.is_empty() {
                out.push(text);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_instructions(item, out);
            }
        }
        Value::Object(obj) => {
            // HowToSection nests its steps
            if let Some(steps) = obj.get("itemListElement") {
                collect_instructions(steps, out);
            } else if let Some(text) = obj.get("text").or_else(|| obj.get("name")) {
                collect_instructions(text, out);
            }
        }
        _ => {}
    }
}

fn decode_html_symbols(text: &str) -> String {
    // entities are sometimes double encoded
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn clean_diet_value(diet: &str) -> String {
    diet.trim_start_matches("https://schema.org/")
        .trim_start_matches("http://schema.org/")
        .replace("Diet", "")
        .trim()
        .to_string()
}

/// Repair the most common JSON-LD defects: raw control characters inside
/// strings and trailing commas before a closing bracket.
pub fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = String::with_capacity(json_str.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json_str.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                '\n' | '\r' | '\t' => {
                    cleaned.push(' ');
                    continue;
                }
                _ => {}
            }
            cleaned.push(c);
            continue;
        }

        match c {
            '"' => in_string = true,
            ']' | '}' => {
                let trimmed_len = cleaned.trim_end().len();
                if cleaned[..trimmed_len].ends_with(',') {
                    cleaned.truncate(trimmed_len - 1);
                }
            }
            _ => {}
        }
        cleaned.push(c);
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_recipe_in_root_object() {
        let doc = json!({"@type": "Recipe", "name": "Soup"});
        assert_eq!(find_recipe_node(&doc).unwrap()["name"], "Soup");
    }

    #[test]
    fn test_find_recipe_with_type_array() {
        let doc = json!([
            {"@type": "WebPage"},
            {"@type": ["Recipe", "NewsArticle"], "name": "Lasagna"}
        ]);
        assert_eq!(find_recipe_node(&doc).unwrap()["name"], "Lasagna");
    }

    #[test]
    fn test_find_recipe_in_graph() {
        let doc = json!({"@graph": [{"@type": "Organization"}, {"@type": "recipe", "name": "Stew"}]});
        assert_eq!(find_recipe_node(&doc).unwrap()["name"], "Stew");

        let nested = json!([{"@graph": [{"@type": "Recipe", "name": "Chili"}]}]);
        assert_eq!(find_recipe_node(&nested).unwrap()["name"], "Chili");
    }

    #[test]
    fn test_no_recipe_node() {
        assert!(find_recipe_node(&json!({"@type": "WebSite"})).is_none());
        assert!(find_recipe_node(&json!("Recipe")).is_none());
    }

    #[test]
    fn test_from_node_fields() {
        let node = json!({
            "@type": "Recipe",
            "name": "Mac &amp; Cheese",
            "recipeIngredient": ["2 cups macaroni", " ", "1 cup cheddar &amp;amp; jack"],
            "recipeCuisine": "American",
            "recipeCategory": ["Dinner", "Main Dish"],
            "suitableForDiet": "https://schema.org/VegetarianDiet",
            "image": [{"url": "https://img.example/mac.jpg"}],
            "recipeInstructions": [
                {"@type": "HowToStep", "text": "Boil pasta."},
                {"@type": "HowToSection", "itemListElement": [
                    {"@type": "HowToStep", "text": "Melt cheese."}
                ]}
            ]
        });

        let recipe = JsonLdRecipe::from_node(&node);
        assert_eq!(recipe.name.as_deref(), Some("Mac & Cheese"));
        assert_eq!(recipe.ingredients, vec!["2 cups macaroni", "1 cup cheddar & jack"]);
        assert_eq!(recipe.cuisine, Some(TagField::from("American")));
        assert_eq!(recipe.category, Some(TagField::from(vec!["Dinner", "Main Dish"])));
        assert_eq!(recipe.diet, Some(TagField::from("Vegetarian")));
        assert_eq!(recipe.image.as_deref(), Some("https://img.example/mac.jpg"));
        assert_eq!(recipe.instructions, vec!["Boil pasta.", "Melt cheese."]);
    }

    #[test]
    fn test_diet_falls_back_to_keywords() {
        let node = json!({"@type": "Recipe", "keywords": "vegan, quick ,"});
        let recipe = JsonLdRecipe::from_node(&node);
        assert_eq!(recipe.diet, Some(TagField::from(vec!["vegan", "quick"])));
    }

    #[test]
    fn test_sanitize_json() {
        let raw = "{\"name\": \"Line\nbreak\", \"list\": [1, 2, ],}";
        let value: Value = serde_json::from_str(&sanitize_json(raw)).unwrap();
        assert_eq!(value["name"], "Line break");
        assert_eq!(value["list"], json!([1, 2]));

        let untouched = r#"{"text": "a, ]"}"#;
        assert_eq!(sanitize_json(untouched), untouched);
    }
}
