use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{RecipeSource, SearchQuery};
use crate::config::SearchConfig;
use crate::error::FinderError;
use crate::model::Recipe;

const RAPIDAPI_HOST: &str = "tasty.p.rapidapi.com";

pub struct TastySource {
    client: Client,
    api_key: String,
    base_url: String,
    results: u32,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<TastyItem>,
}

#[derive(Debug, Deserialize)]
struct TastyItem {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    original_video_url: Option<String>,
    #[serde(default)]
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct Section {
    #[serde(default)]
    components: Vec<Component>,
}

#[derive(Debug, Deserialize)]
struct Component {
    #[serde(default)]
    raw_text: Option<String>,
}

impl TastyItem {
    fn into_recipe(self, index: usize) -> Recipe {
        let id = match self.id {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => index.to_string(),
        };

        Recipe {
            id,
            title: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            image: self.thumbnail_url.unwrap_or_default(),
            source_url: self
                .original_video_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| "#".to_string()),
            ingredients: self
                .sections
                .into_iter()
                .flat_map(|section| section.components)
                .filter_map(|component| component.raw_text)
                .filter(|text| !text.trim().is_empty())
                .collect(),
            ..Default::default()
        }
    }
}

impl TastySource {
    pub fn new(config: &SearchConfig, timeout: Duration) -> Result<Self, FinderError> {
        let api_key = config
            .tasty_api_key
            .clone()
            .or_else(|| std::env::var("TASTY_API_KEY").ok())
            .ok_or_else(|| FinderError::MissingApiKey("TASTY_API_KEY".to_string()))?;

        Ok(TastySource {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: config.tasty_base_url.trim_end_matches('/').to_string(),
            results: config.results,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        TastySource {
            client: Client::new(),
            api_key,
            base_url,
            results: 10,
        }
    }

    fn headers(&self) -> Result<HeaderMap, FinderError> {
        let mut headers = HeaderMap::new();
        headers.insert("x-rapidapi-key", HeaderValue::from_str(&self.api_key)?);
        headers.insert("x-rapidapi-host", HeaderValue::from_static(RAPIDAPI_HOST));
        Ok(headers)
    }
}

#[async_trait]
impl RecipeSource for TastySource {
    fn source_name(&self) -> &str {
        "tasty"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, FinderError> {
        let response = self
            .client
            .get(format!("{}/recipes/list", self.base_url))
            .headers(self.headers()?)
            .query(&[
                ("from", "0".to_string()),
                ("size", self.results.to_string()),
                ("q", query.ingredient_list()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ListResponse = response.json().await?;
        debug!("Tasty returned {} results", body.results.len());

        Ok(body
            .results
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.into_recipe(index))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_search_maps_fallbacks() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/recipes/list")
            .match_header("x-rapidapi-key", "tasty-key")
            .match_header("x-rapidapi-host", RAPIDAPI_HOST)
            .match_query(Matcher::UrlEncoded("q".into(), "egg".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "results": [
                        {
                            "id": 8123,
                            "name": "Shakshuka",
                            "thumbnail_url": "https://img.example.com/s.jpg",
                            "original_video_url": "https://video.example.com/s.mp4",
                            "sections": [
                                {"components": [{"raw_text": "4 eggs"}, {"raw_text": "1 can tomatoes"}]}
                            ]
                        },
                        {}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let source = TastySource::with_base_url("tasty-key".to_string(), server.url());
        let recipes = source.search(&SearchQuery::new(["egg"])).await.unwrap();

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id, "8123");
        assert_eq!(recipes[0].ingredients, vec!["4 eggs", "1 can tomatoes"]);

        assert_eq!(recipes[1].id, "1");
        assert_eq!(recipes[1].title, "Untitled");
        assert_eq!(recipes[1].image, "");
        assert_eq!(recipes[1].source_url, "#");
        assert!(recipes[1].ingredients.is_empty());
        mock.assert_async().await;
    }
}
