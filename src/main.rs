//! Web Service Template - Main Entry Point

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use web_service_template::infrastructure::driven_adapters::config::AppConfig;
use web_service_template::infrastructure::driving_adapters::api_rest::create_router;
use web_service_template::infrastructure::driving_adapters::api_rest::modules::health;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web_service_template=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!(
        title = %config.metadata.title,
        version = %config.metadata.version,
        "Configuration loaded successfully"
    );

    // Build router
    let app = create_router(&config, vec![health::module()?])?.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("API documentation at http://{}{}", addr, config.metadata.docs_path);

    axum::serve(listener, app).await?;

    Ok(())
}
