use crate::signaling::Gateway;
use crate::transport::WsTransport;
use axum::Json;
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug, Default, Deserialize)]
pub struct ConnectParams {
    pub token: Option<String>,
    /// Display name for anonymous connections.
    pub name: Option<String>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(gateway): State<Gateway>,
) -> Response {
    let identity = match gateway
        .resolve_identity(params.token.as_deref(), params.name.as_deref())
        .await
    {
        Ok(identity) => identity,
        Err(e) => {
            warn!("Rejecting websocket connection: {}", e);
            return (StatusCode::UNAUTHORIZED, e.to_string()).into_response();
        }
    };

    ws.on_upgrade(move |socket| async move {
        gateway.admit(identity, WsTransport::new(socket)).await;
    })
}

pub async fn health_handler(State(gateway): State<Gateway>) -> Response {
    match gateway.hub().snapshot().await {
        Ok(snapshot) => Json(json!({
            "status": "ok",
            "message": "Server is running",
            "participants": snapshot.participants,
            "waiting": snapshot.waiting.len(),
            "rooms": snapshot.rooms.len(),
        }))
        .into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "error", "message": e.to_string()})),
            )
                .into_response()
        }
    }
}
