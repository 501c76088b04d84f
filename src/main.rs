use axum::Router;
use sentinel::api;
use sentinel::config::Config;
use sentinel::services::MarketRanker;
use sentinel::sources::CoinExClient;
use sentinel::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentinel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Sentinel server on {}:{}", config.host, config.port);
    info!(
        "Scanning {} markets via {} (top {}, {:?} profile, {:?} deadline)",
        config.scan.quote_asset,
        config.coinex_api_url,
        config.scan.top_k,
        config.scan.scoring_profile,
        config.scan.deadline
    );

    let source = Arc::new(CoinExClient::new(
        config.coinex_api_url.clone(),
        config.http_timeout,
    ));
    let ranker = MarketRanker::new(source, config.scan.clone());

    let state = AppState {
        config: config.clone(),
        ranker,
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Sentinel server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
