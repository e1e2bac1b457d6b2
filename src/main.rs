//! CardioInsight server entry point

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardioinsight_server::{config, create_router, logic, AppState};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardioinsight_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("CardioInsight server starting...");

    // Load model artifacts; the service cannot run without them
    let engine = match logic::model::loader::load(&config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Failed to load model artifacts: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server port");
    axum::serve(listener, app).await.expect("Server error");
}
