use crate::config::Config;
use crate::hub::Hub;
use crate::signaling::{Gateway, JwtIdentityResolver, health_handler, ws_handler};
use anyhow::Context;
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// HTTP surface: `/ws` for participants, `/health` for probes.
pub fn router(gateway: Gateway, config: &Config) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Start the hub and serve until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let hub = Hub::spawn(config.hub_mailbox);
    let identity = Arc::new(JwtIdentityResolver::new(
        config.jwt_secret.clone(),
        config.anonymous_name.clone(),
        config.reject_invalid_tokens,
    ));
    let gateway = Gateway::new(hub, identity, config.outbound_buffer);

    let app = router(gateway, &config);

    let listener = TcpListener::bind(config.bind_address.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Signaling server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
