//! Request middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use skillswap_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Guards the `/internal` surface with the shared internal token.
///
/// When no token is configured the surface is open, which is only
/// acceptable on a private network; deployments set
/// `SKILLSWAP__PROFILE__INTERNAL_TOKEN`.
pub async fn internal_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = &state.config.profile.internal_token {
        let presented = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        if presented != Some(expected.as_str()) {
            return Err(ApiError(AppError::authentication(
                "Invalid internal token",
            )));
        }
    }

    Ok(next.run(request).await)
}
