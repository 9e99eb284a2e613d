//! Internal presence listing for the REST collaborator.

use axum::extract::State;
use axum::Json;

use skillswap_realtime::presence::PresenceSnapshot;

use crate::state::AppState;

/// GET /internal/presence
pub async fn online_users(State(state): State<AppState>) -> Json<Vec<PresenceSnapshot>> {
    Json(state.engine.delivery.online_users())
}
