use log::{debug, warn};
use scraper::{ElementRef, Html};
use uuid::Uuid;

use super::json_ld;
use super::selector;
use crate::error::FinderError;
use crate::model::Recipe;

/// Image used when a page offers none
pub const PLACEHOLDER_IMAGE: &str = "https://placekitten.com/400/300";

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn select_texts(document: &Html, css: &str) -> Result<Vec<String>, FinderError> {
    let sel = selector(css)?;
    Ok(document
        .select(&sel)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect())
}

/// Turn a recipe page into a [`Recipe`] with a freshly generated id.
///
/// Structured JSON-LD data is preferred for ingredients, tags and image;
/// the visible markup fills in whatever it lacks.
pub fn scrape_recipe_page(html: &str, url: &str) -> Result<Recipe, FinderError> {
    let document = Html::parse_document(html);
    let structured = json_ld::extract(&document)?;
    if structured.is_none() {
        warn!("No JSON-LD recipe data found for {}", url);
    }
    let structured = structured.unwrap_or_default();

    let h1 = selector("h1")?;
    let title = document
        .select(&h1)
        .map(element_text)
        .find(|text| !text.is_empty())
        .or_else(|| structured.name.clone())
        .unwrap_or_default();

    let mut ingredients = structured.ingredients;
    if ingredients.is_empty() {
        ingredients = select_texts(&document, ".ingredients-item-name")?;
    }

    let image = match structured.image {
        Some(image) => image,
        None => {
            let og_image = selector("meta[property='og:image']")?;
            document
                .select(&og_image)
                .filter_map(|meta| meta.value().attr("content"))
                .map(str::trim)
                .find(|content| !content.is_empty())
                .map(String::from)
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
        }
    };

    let mut instructions = select_texts(&document, ".mntl-sc-block p")?;
    if instructions.is_empty() {
        instructions = structured.instructions;
    }

    debug!(
        "Scraped '{}' from {}: {} ingredients, {} steps",
        title,
        url,
        ingredients.len(),
        instructions.len()
    );

    Ok(Recipe {
        id: Uuid::new_v4().to_string(),
        title,
        image,
        source_url: url.to_string(),
        ingredients,
        instructions,
        cuisine: structured.cuisine,
        category: structured.category,
        diet: structured.diet,
    })
}
