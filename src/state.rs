//! Shared handler state.

use std::sync::Arc;

use skillswap_core::config::AppConfig;
use skillswap_realtime::{AuthenticationGate, RealtimeEngine};

/// State threaded through every route via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Real-time engine.
    pub engine: RealtimeEngine,
    /// Pre-upgrade authentication gate.
    pub gate: Arc<AuthenticationGate>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}
