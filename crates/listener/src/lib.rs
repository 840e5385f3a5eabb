//! Hook Mentor webhook receiver.
//!
//! A single route, `/`:
//!
//! | Method | Behaviour |
//! |--------|-----------|
//! | `GET`  | Health check. `200` with a fixed status text, no authentication. |
//! | `POST` | Webhook delivery. `403` unless the `X-Hub-Signature-256` header is a valid HMAC of the raw body; otherwise `200` with the dispatcher's acknowledgement. |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Header extraction and HTTP status mapping live here.
//! Signature checking is delegated to [`github`]; pipeline work to
//! [`nodes::EventDispatcher`]. Nothing downstream of a rejected request runs.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use github::{WebhookRequest, DELIVERY_HEADER, EVENT_HEADER, SIGNATURE_HEADER};
use nodes::EventDispatcher;
use pipeline::Secret;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Body of the health-check response.
pub const HEALTH_MESSAGE: &str = "DevOps Bot Online!";

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    webhook_secret: Secret,
    dispatcher: EventDispatcher,
}

impl AppState {
    /// Creates the state shared by every handler.
    pub fn new(webhook_secret: Secret, dispatcher: EventDispatcher) -> Self {
        Self {
            webhook_secret,
            dispatcher,
        }
    }
}

/// Builds the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health).post(receive_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, HEALTH_MESSAGE)
}

async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = WebhookRequest {
        body: &body,
        signature: header(&headers, SIGNATURE_HEADER),
        event_type: header(&headers, EVENT_HEADER),
        delivery_id: header(&headers, DELIVERY_HEADER),
    };

    let delivery = match request.authenticate(state.webhook_secret.expose()) {
        Ok(delivery) => delivery,
        Err(rejection) => return (StatusCode::FORBIDDEN, rejection.to_string()).into_response(),
    };

    let ack = state.dispatcher.dispatch(delivery).await;
    (StatusCode::OK, ack.message()).into_response()
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Serves `router` on `addr` until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Webhook listener started");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
