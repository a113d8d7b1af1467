use juicebar::config::AppConfig;
use juicebar::recipes::services::{
    create_recipe, rate_recipe, search_recipes, suggest_names,
};
use juicebar::recipes::NewRecipe;
use juicebar::store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "juicebar=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env();
    let store = MemoryStore::new(&config.index_name);

    let green = create_recipe(
        &store,
        NewRecipe {
            name: "Green Machine".into(),
            photo: "photos/green-machine.jpg".into(),
            ingredients: vec!["kale".into(), "apple".into(), "ginger".into()],
            tags: vec!["detox".into()],
        },
    )
    .await?;

    let citrus = create_recipe(
        &store,
        NewRecipe {
            name: "Citrus Sunrise".into(),
            photo: "photos/citrus-sunrise.jpg".into(),
            ingredients: vec!["orange".into(), "carrot".into(), "turmeric".into()],
            tags: vec!["breakfast".into()],
        },
    )
    .await?;

    for rating in [5, 4, 5, 5, 4] {
        rate_recipe(&store, green.id, rating).await?;
    }
    rate_recipe(&store, citrus.id, 5).await?;

    let hits = search_recipes(&store, "kale", config.search_limit).await?;
    println!("search \"kale\":");
    println!("{}", serde_json::to_string_pretty(&hits)?);

    let names = suggest_names(&store, "ci", config.suggest_limit).await?;
    println!("suggest \"ci\": {names:?}");

    Ok(())
}
