//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use skillswap_core::config::realtime::RealtimeConfig;
use skillswap_core::error::AppError;

use crate::bridge::delivery::DeliveryCoordinator;
use crate::channel::registry::ChannelRegistry;
use crate::connection::heartbeat::HeartbeatConfig;
use crate::connection::manager::ConnectionManager;
use crate::event::router::EventRouter;
use crate::metrics::EngineMetrics;
use crate::presence::registry::PresenceRegistry;

/// Central engine that coordinates the WebSocket subsystems.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Channel registry.
    pub channels: Arc<ChannelRegistry>,
    /// Presence registry.
    pub presence: Arc<PresenceRegistry>,
    /// Inbound event router.
    pub router: Arc<EventRouter>,
    /// REST-side delivery coordinator.
    pub delivery: Arc<DeliveryCoordinator>,
    /// Metrics collector.
    pub metrics: Arc<EngineMetrics>,
    /// Engine configuration.
    config: RealtimeConfig,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine").finish()
    }
}

impl RealtimeEngine {
    /// Creates a new engine with all subsystems wired.
    pub fn new(config: RealtimeConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let metrics = Arc::new(EngineMetrics::new());
        let channels = Arc::new(ChannelRegistry::new());
        let presence = Arc::new(PresenceRegistry::new());
        let connections = Arc::new(ConnectionManager::new(
            config.clone(),
            channels.clone(),
            presence.clone(),
            metrics.clone(),
        ));
        let router = Arc::new(EventRouter::new(
            connections.clone(),
            channels.clone(),
            presence.clone(),
            metrics.clone(),
            config.max_event_bytes,
        ));
        let delivery = Arc::new(DeliveryCoordinator::new(
            connections.clone(),
            presence.clone(),
        ));

        info!("Real-time engine initialized");

        Self {
            connections,
            channels,
            presence,
            router,
            delivery,
            metrics,
            config,
            shutdown_tx,
        }
    }

    /// Heartbeat settings derived from the engine configuration.
    pub fn heartbeat_config(&self) -> HeartbeatConfig {
        HeartbeatConfig::from_realtime(&self.config)
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Initiates a graceful shutdown of the engine.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        info!("Shutting down real-time engine");

        let _ = self.shutdown_tx.send(());
        self.connections.close_all();

        info!("Real-time engine shut down");
        Ok(())
    }
}
