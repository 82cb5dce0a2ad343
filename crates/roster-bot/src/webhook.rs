//! Webhook server for the roster bot
//!
//! Receives connector activities on `POST /api/messages`. Handler failures
//! are logged and the endpoint still answers 200: the platform retries on
//! non-2xx and a retried activity would fail the same way.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use roster_core::{Activity, Error};

use crate::handler::ActivityHandler;

/// Webhook server state
#[derive(Clone)]
pub struct WebhookState {
    pub handler: Arc<ActivityHandler>,
}

/// Create the webhook router
pub fn create_webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route("/api/messages", post(handle_activity))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Handle one inbound activity
async fn handle_activity(
    State(state): State<Arc<WebhookState>>,
    Json(activity): Json<Activity>,
) -> StatusCode {
    if let Err(e) = state.handler.process_activity(&activity).await {
        error!("Error processing activity: {}", e);
    }

    StatusCode::OK
}

/// Start the webhook server (blocking)
pub async fn start_webhook_server(state: WebhookState, port: u16) -> roster_core::Result<()> {
    let app = create_webhook_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Webhook(e.to_string()))?;

    info!("Roster bot webhook listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Webhook(e.to_string()))?;

    Ok(())
}
