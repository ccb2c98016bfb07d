use devcamp_api::config::Config;
use devcamp_api::routes;
use devcamp_api::seed::Seed;
use devcamp_api::state::AppState;
use devcamp_lists::{ListService, Resources};
use devcamp_store::MemoryStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let resources = Resources::default();
    let lists = ListService::new(MemoryStore::with_collections(resources.collections()));

    if let Some(path) = &config.seed_path {
        match Seed::from_path(path).and_then(|seed| seed.load(&lists, &resources)) {
            Ok(count) => tracing::info!("seeded {count} documents from {}", path.display()),
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    let state = AppState::new(lists, resources, &config);
    let app = routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.api_addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("failed to bind {}: {e}", config.api_addr);
            std::process::exit(1);
        });

    tracing::info!(
        "devcamp-api listening on {} (request timeout {:?})",
        config.api_addr,
        config.request_timeout
    );
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("server error: {e}");
        std::process::exit(1);
    }
}
