use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::{Path, PathBuf};

use recipe_finder::config::AppConfig;
use recipe_finder::scrape::{scrape_recipe_page, write_archive, RequestFetcher, Scraper};
use recipe_finder::search::SearchQuery;
use recipe_finder::{
    ask_for_recipe, Clock, Favorites, FilterCriteria, FinderError, FoundRecipe,
    IngredientSuggester, Pantry, RecipeFinder, Suggestion, SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "recipe-finder")]
#[command(about = "Pantry-aware recipe discovery and scraping", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape every recipe linked from a category page into the archive
    Scrape {
        /// Category page (defaults to the configured one)
        #[arg(long)]
        category: Option<String>,

        /// Archive file (defaults to the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scrape a single recipe page and print it as JSON
    ScrapePage { url: String },

    /// Show recipes matching a pantry, with what you have and what you need
    Find {
        /// Pantry file: a JSON list of {"name", "expires"} entries
        #[arg(short, long)]
        pantry: PathBuf,

        /// Read candidate recipes from a scraped archive
        #[arg(long, conflicts_with = "search")]
        archive: Option<PathBuf>,

        /// Search upstream for recipes using these ingredients
        #[arg(long, value_delimiter = ',')]
        search: Option<Vec<String>>,

        /// Favorites file: a JSON list of recipes
        #[arg(long)]
        favorites: Option<PathBuf>,

        /// Show favorites instead of the candidate recipes
        #[arg(long = "show-favorites", requires = "favorites")]
        show_favorites: bool,

        /// Apply filters to favorites as well
        #[arg(long = "filter-favorites")]
        filter_favorites: bool,

        #[arg(long, default_value = "")]
        diet: String,

        /// Dish type, e.g. "main course"
        #[arg(long = "type", default_value = "")]
        category: String,

        #[arg(long, default_value = "")]
        cuisine: String,

        /// Hide recipes containing this ingredient
        #[arg(long)]
        exclude: Option<String>,

        /// List recipes using expiring ingredients first
        #[arg(long = "expiring-first")]
        expiring_first: bool,

        /// Date to judge freshness against (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Suggest a known ingredient name for a possibly misspelled one
    Suggest { name: String },

    /// Ask a language model for a recipe idea
    Ask {
        /// Free-text question; without one the pantry is sent
        message: Option<String>,

        #[arg(short, long)]
        pantry: Option<PathBuf>,

        /// Provider name (defaults to the configured one)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Remove expired entries from a pantry file
    ClearExpired {
        pantry: PathBuf,

        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FinderError> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}

async fn read_pantry(path: Option<&Path>) -> Result<Pantry, FinderError> {
    match path {
        Some(path) => read_json(path).await,
        None => Ok(Pantry::new()),
    }
}

fn print_found(found: &[FoundRecipe]) {
    if found.is_empty() {
        println!("No recipes found.");
        return;
    }

    for item in found {
        let marker = if item.uses_expiring {
            " [uses expiring ingredients]"
        } else {
            ""
        };
        println!("{}{}", item.recipe.title, marker);
        println!("  Have: {}", item.breakdown.have.join(", "));
        println!("  Need: {}", item.breakdown.need.join(", "));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Scrape { category, output } => {
            let category = category.unwrap_or_else(|| config.scraper.category_url.clone());
            let output = output.unwrap_or_else(|| PathBuf::from(&config.scraper.output));

            let scraper = Scraper::new(&config.scraper)?;
            let report = scraper.scrape_category(&category).await?;
            for failure in &report.failures {
                error!("Skipped {}: {}", failure.url, failure.error);
            }
            write_archive(&output, &report.recipes).await?;
            println!(
                "Saved {} recipes to {} ({} failed)",
                report.recipes.len(),
                output.display(),
                report.failures.len()
            );
        }

        Commands::ScrapePage { url } => {
            let fetcher = RequestFetcher::new(Some(std::time::Duration::from_secs(
                config.scraper.timeout_secs,
            )))?;
            let html = fetcher.fetch(&url).await?;
            let recipe = scrape_recipe_page(&html, &url)?;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        }

        Commands::Find {
            pantry,
            archive,
            search,
            favorites,
            show_favorites,
            filter_favorites,
            diet,
            category,
            cuisine,
            exclude,
            expiring_first,
            today,
        } => {
            let pantry: Pantry = read_json(&pantry).await?;
            let favorites: Favorites = match favorites {
                Some(path) => read_json(&path).await?,
                None => Favorites::new(),
            };

            let mut criteria = FilterCriteria::new()
                .diet(diet.as_str())
                .category(category.as_str())
                .cuisine(cuisine.as_str())
                .filter_favorites(filter_favorites)
                .prioritize_expiring(expiring_first);
            if let Some(exclude) = exclude {
                criteria = criteria.exclude(exclude);
            }

            let mut builder = RecipeFinder::builder()
                .pantry(pantry)
                .favorites(favorites)
                .criteria(criteria)
                .search_config(config.search.clone())
                .today(today.unwrap_or_else(|| SystemClock.today()));
            if let Some(path) = archive {
                builder = builder.archive(path);
            } else if let Some(ingredients) = search {
                builder = builder.search(SearchQuery::new(ingredients));
            }
            if show_favorites {
                builder = builder.favorites_view();
            }

            let found = builder.build().await?;
            print_found(&found);
        }

        Commands::Suggest { name } => {
            let suggester =
                IngredientSuggester::new(&config.suggestions.vocabulary, config.suggestions.threshold);
            match suggester.suggest(&name) {
                Suggestion::Correction { suggested, .. } => println!("Did you mean {suggested}?"),
                Suggestion::Unchanged(name) => println!("No suggestion for {name}"),
            }
        }

        Commands::Ask {
            message,
            pantry,
            provider,
        } => {
            let pantry = read_pantry(pantry.as_deref()).await?;
            let reply = ask_for_recipe(
                message.as_deref(),
                &pantry,
                provider.as_deref(),
                SystemClock.today(),
            )
            .await?;
            println!("{reply}");
        }

        Commands::ClearExpired { pantry: path, today } => {
            let mut pantry: Pantry = read_json(&path).await?;
            let removed = pantry.clear_expired(today.unwrap_or_else(|| SystemClock.today()));
            tokio::fs::write(&path, serde_json::to_string_pretty(&pantry)?).await?;
            for entry in &removed {
                info!("Removed {} (expired {})", entry.name(), entry.expires_on());
            }
            println!("Removed {} expired ingredients", removed.len());
        }
    }

    Ok(())
}
