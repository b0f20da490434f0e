// PIVCOR Lead Chat Server
// HTTP surface for the chat engine and the lead/contact intake

pub mod handlers;
pub mod state;

use std::io;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub use state::{AppState, SharedState};

/// Build the application router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::chat::handle_chat))
        .route("/api/leads", post(handlers::leads::handle_lead))
        .route("/api/contact", post(handlers::contact::handle_contact))
        .route("/api/health", get(handlers::health::handle_health))
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn run<F>(state: AppState, shutdown: F) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = state.config.socket_addr();
    if !state.intake.mailer().is_configured() {
        log::warn!("[server] RESEND_API_KEY is not configured; lead and contact e-mail will fail");
    }

    let app = router(Arc::new(state));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("[server] Failed to bind to {}: {}", addr, e);
            return Err(e);
        }
    };

    log::info!("[server] Server started on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    log::info!("[server] Server stopped");
    Ok(())
}
