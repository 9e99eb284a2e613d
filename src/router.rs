//! Route definitions for the real-time gateway.

use axum::http::{HeaderValue, Method};
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Builds the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().route("/health", get(handlers::health::health));

    let internal_routes = Router::new()
        .route("/presence", get(handlers::presence::online_users))
        .route(
            "/events/message-delivered",
            post(handlers::events::message_delivered),
        )
        .route("/events/message-read", post(handlers::events::message_read))
        .route(
            "/events/message-deleted",
            post(handlers::events::message_deleted),
        )
        .route("/events/notification", post(handlers::events::notification))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::internal_auth,
        ));

    let cors = build_cors_layer(&state);

    Router::new()
        .route("/ws", get(handlers::ws::ws_upgrade))
        .nest("/api", api_routes)
        .nest("/internal", internal_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.is_empty() {
        layer
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
