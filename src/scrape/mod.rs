mod archive;
mod category;
mod fetch;
mod json_ld;
mod page;

pub use archive::{read_archive, write_archive};
pub use category::collect_recipe_links;
pub use fetch::RequestFetcher;
pub use json_ld::{find_recipe_node, sanitize_json, JsonLdRecipe};
pub use page::{scrape_recipe_page, PLACEHOLDER_IMAGE};

use log::{info, warn};
use scraper::Selector;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::FinderError;
use crate::model::Recipe;

pub(crate) fn selector(css: &str) -> Result<Selector, FinderError> {
    Selector::parse(css)
        .map_err(|e| FinderError::ParseError(format!("Invalid selector {css}: {e:?}")))
}

/// A page that could not be scraped during a category crawl
#[derive(Debug)]
pub struct ScrapeFailure {
    pub url: String,
    pub error: FinderError,
}

#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub recipes: Vec<Recipe>,
    pub failures: Vec<ScrapeFailure>,
}

pub struct Scraper {
    fetcher: RequestFetcher,
}

impl Scraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, FinderError> {
        Ok(Scraper {
            fetcher: RequestFetcher::new(Some(Duration::from_secs(config.timeout_secs)))?,
        })
    }

    pub async fn scrape_url(&self, url: &str) -> Result<Recipe, FinderError> {
        let html = self.fetcher.fetch(url).await?;
        scrape_recipe_page(&html, url)
    }

    /// Scrape every recipe linked from a category page.
    ///
    /// Only a failure to load the category page itself is an error; pages
    /// that fail are logged and reported alongside the recipes.
    pub async fn scrape_category(&self, category_url: &str) -> Result<ScrapeReport, FinderError> {
        info!("Fetching category page: {}", category_url);
        let html = self.fetcher.fetch(category_url).await?;
        let urls = collect_recipe_links(&html, category_url)?;
        info!("Found {} recipes", urls.len());

        let mut report = ScrapeReport::default();
        for url in urls {
            info!("Scraping: {}", url);
            match self.scrape_url(&url).await {
                Ok(recipe) => report.recipes.push(recipe),
                Err(error) => {
                    warn!("Failed to scrape {}: {}", url, error);
                    report.failures.push(ScrapeFailure { url, error });
                }
            }
        }

        Ok(report)
    }
}
