//! WebSocket upgrade handler and per-connection socket loops.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use skillswap_realtime::connection::AuthenticatedUser;
use skillswap_realtime::connection::heartbeat::run_heartbeat;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the WebSocket handshake.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token. May instead arrive as an Authorization header.
    pub token: Option<String>,
}

/// GET /ws?token={jwt} — WebSocket upgrade.
///
/// The authentication gate runs before the upgrade completes, so a
/// rejected client receives an HTTP status rather than a doomed socket.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let header_token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let credential = query.token.as_deref().or(header_token);

    let user = state.gate.authenticate(credential).await?;

    Ok(ws.on_upgrade(move |socket| handle_socket(state, user, socket)))
}

/// Drives one established WebSocket connection.
async fn handle_socket(state: AppState, user: AuthenticatedUser, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state
        .engine
        .connections
        .register(user.user_id, user.profile);
    let conn_id = handle.id;

    info!(conn_id = %conn_id, user_id = %user.user_id, "WebSocket connection established");

    // Outbound forwarder: engine frames → socket.
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // Application-level keepalive. The task finishes when the connection
    // times out or dies, which must tear the socket down even if the
    // client never sends another frame.
    let mut heartbeat_task =
        tokio::spawn(run_heartbeat(handle.clone(), state.engine.heartbeat_config()));

    let mut shutdown_rx = state.engine.shutdown_receiver();

    loop {
        tokio::select! {
            inbound = ws_rx.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        state.engine.router.route(conn_id, text.as_str());
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Pong(_))) => {
                        handle.record_pong();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                        break;
                    }
                }
                if !handle.is_alive() {
                    break;
                }
            }
            _ = &mut heartbeat_task => {
                warn!(conn_id = %conn_id, "Connection timed out, closing socket");
                break;
            }
            _ = shutdown_rx.recv() => break,
        }
    }

    outbound_task.abort();
    heartbeat_task.abort();
    state.engine.connections.unregister(&conn_id);

    info!(conn_id = %conn_id, user_id = %user.user_id, "WebSocket connection closed");
}
