use reqwest::Url;
use std::collections::HashSet;

use super::selector;
use crate::error::FinderError;

fn is_recipe_link(href: &str) -> bool {
    href.contains("/recipe/") && !href.contains('#') && !href.contains("/videos/")
}

/// Recipe page links on a category page, in document order and without
/// duplicates. Query strings are dropped and relative links resolved
/// against `base_url`.
pub fn collect_recipe_links(html: &str, base_url: &str) -> Result<Vec<String>, FinderError> {
    let base = Url::parse(base_url)
        .map_err(|e| FinderError::ParseError(format!("Invalid category URL {base_url}: {e}")))?;
    let document = scraper::Html::parse_document(html);
    let anchors = selector("a[href]")?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_recipe_link(href) {
            continue;
        }

        let without_query = href.split('?').next().unwrap_or(href);
        let Ok(resolved) = base.join(without_query) else {
            continue;
        };
        let resolved = resolved.to_string();
        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.allrecipes.com/recipes/15436/everyday-cooking/one-pot-meals/";

    #[test]
    fn test_collect_recipe_links() {
        let html = r##"
            <a href="https://www.allrecipes.com/recipe/1/chili/?utm=x">Chili</a>
            <a href="/recipe/2/stew/">Stew</a>
            <a href="https://www.allrecipes.com/recipe/1/chili/">Chili again</a>
            <a href="https://www.allrecipes.com/recipe/3/soup/#reviews">Reviews</a>
            <a href="https://www.allrecipes.com/videos/recipe/4/pasta/">Video</a>
            <a href="https://www.allrecipes.com/recipes/5/dinner/">Category</a>
            <a>No href</a>
        "##;

        let links = collect_recipe_links(html, BASE).unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.allrecipes.com/recipe/1/chili/",
                "https://www.allrecipes.com/recipe/2/stew/",
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = collect_recipe_links("", "not a url");
        assert!(matches!(result, Err(FinderError::ParseError(_))));
    }
}
