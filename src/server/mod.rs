mod handlers;
mod types;

pub use handlers::AppState;
pub use types::ErrorResponse;

use crate::{Result, config::Config, model::Classifier, scoring::Scorer};
use axum::{Router, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the application router around one shared, read-only scorer.
pub fn app(scorer: Scorer) -> Router {
    let state = AppState {
        scorer: Arc::new(scorer),
    };

    Router::new()
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Load the classifier artifact once; it is immutable for the process
    // lifetime.
    let artifact_path = std::env::var("MODEL_ARTIFACT_PATH")
        .unwrap_or_else(|_| config.model.artifact_path.clone());
    let classifier = Classifier::load(&artifact_path).await?;
    info!("Loaded classifier artifact from {}", artifact_path);

    let app = app(Scorer::new(classifier));

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
