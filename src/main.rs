use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use parking_gateway::config::Config;
use parking_gateway::constants::API_NAME;
use parking_gateway::handlers::{graphql, health};
use parking_gateway::repository::ParkingApi;
use parking_gateway::schema;
use std::net::SocketAddr;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize configuration
    let config = Config::from_env().context("API_URL must be set")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "{} Starting parking gateway on port {} (upstream: {})",
        API_NAME,
        config.server_port,
        config.api_url
    );

    let api = ParkingApi::new(config.api_url.clone());
    let schema = schema::build_schema(api);

    let cors = match &config.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    };

    // Build application router
    let app = Router::new()
        .merge(graphql::router())
        .merge(health::router())
        .layer(cors)
        .with_state(schema);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
