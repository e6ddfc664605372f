use chrono::NaiveDate;
use mockito::Matcher;
use recipe_finder::search::{
    RecipeSource, SearchQuery, SearchSequencer, SpoonacularSource, TastySource,
};
use recipe_finder::{FilterCriteria, FinderError, Pantry, PantryEntry, Recipe, RecipeFinder};
use std::time::Duration;
use tokio::sync::mpsc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

const SPOONACULAR_BODY: &str = r#"{
    "results": [
        {
            "id": 1,
            "title": "Garlic Shrimp Pasta",
            "image": "https://img.example.com/1.jpg",
            "sourceUrl": "https://example.com/1",
            "cuisines": ["Italian"],
            "dishTypes": ["main course"],
            "diets": [],
            "extendedIngredients": [
                {"original": "8 oz spaghetti"},
                {"original": "1 lb shrimp"},
                {"original": "4 cloves garlic"}
            ]
        },
        {
            "id": 2,
            "title": "Garlic Bread",
            "cuisines": ["Italian", "European"],
            "dishTypes": ["side dish"],
            "diets": ["vegetarian"],
            "extendedIngredients": [{"original": "1 baguette"}, {"original": "garlic butter"}]
        }
    ]
}"#;

#[tokio::test]
async fn test_spoonacular_results_flow_through_filters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("includeIngredients".into(), "garlic,shrimp".into()),
            Matcher::UrlEncoded("cuisine".into(), "Italian".into()),
            Matcher::UrlEncoded("addRecipeInformation".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SPOONACULAR_BODY)
        .create_async()
        .await;

    let source = SpoonacularSource::with_base_url("key".to_string(), server.url());
    let pantry = Pantry::from(vec![
        PantryEntry::new("garlic", NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()).unwrap(),
        PantryEntry::new("shrimp", today()).unwrap(),
    ]);

    let found = RecipeFinder::builder()
        .search(SearchQuery::new(["garlic", "shrimp"]).cuisine("Italian"))
        .source(Box::new(source))
        .pantry(pantry)
        .criteria(FilterCriteria::new().category("main").prioritize_expiring(true))
        .today(today())
        .build()
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].recipe.title, "Garlic Shrimp Pasta");
    assert!(found[0].uses_expiring);
    assert_eq!(found[0].breakdown.have, vec!["1 lb shrimp", "4 cloves garlic"]);
    assert_eq!(found[0].breakdown.need, vec!["8 oz spaghetti"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_cuisine_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let source = SpoonacularSource::with_base_url("key".to_string(), server.url());
    let result = source
        .search(&SearchQuery::new(["rice"]).cuisine("Martian"))
        .await;

    assert!(matches!(result, Err(FinderError::InvalidCuisine(c)) if c == "Martian"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_error_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/list")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let source = TastySource::with_base_url("key".to_string(), server.url());
    let result = source.search(&SearchQuery::new(["egg"])).await;
    assert!(matches!(result, Err(FinderError::FetchError(_))));
}

#[tokio::test]
async fn test_sequencer_discards_out_of_order_results() {
    let mut sequencer: SearchSequencer<Vec<Recipe>> = SearchSequencer::new();
    let (tx, mut rx) = mpsc::channel(2);

    // The first search is slow, the second one fast
    for (delay_ms, title) in [(50, "stale"), (0, "fresh")] {
        let ticket = sequencer.begin();
        let tx = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let _ = tx.send((ticket, vec![Recipe::new(title, title)])).await;
        });
    }
    drop(tx);

    let mut applied = Vec::new();
    while let Some((ticket, recipes)) = rx.recv().await {
        applied.push((ticket.sequence(), sequencer.complete(ticket, recipes)));
    }

    assert_eq!(applied, vec![(2, true), (1, false)]);
    assert_eq!(sequencer.current().unwrap()[0].title, "fresh");
    assert!(!sequencer.in_flight());
}
