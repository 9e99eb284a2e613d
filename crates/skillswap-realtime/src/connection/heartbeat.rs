//! Ping/pong keepalive.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time;

use skillswap_core::config::realtime::RealtimeConfig;

use crate::event::types::OutboundEvent;

use super::handle::ConnectionHandle;

/// Heartbeat configuration.
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Interval between pings.
    pub ping_interval: Duration,
    /// Silence window before the connection is considered dead.
    pub ping_timeout: Duration,
}

impl HeartbeatConfig {
    /// Derives heartbeat settings from the engine configuration.
    pub fn from_realtime(config: &RealtimeConfig) -> Self {
        Self {
            ping_interval: Duration::from_secs(config.ping_interval_seconds),
            ping_timeout: Duration::from_secs(config.ping_timeout_seconds),
        }
    }
}

/// Runs the keepalive loop for one connection.
///
/// Sends periodic pings, marks the connection closed when no pong arrives
/// within the timeout, and then returns. The transport loop selects on
/// this task's completion to tear the socket down, so a client that stops
/// sending frames is still disconnected.
pub async fn run_heartbeat(handle: Arc<ConnectionHandle>, config: HeartbeatConfig) {
    let mut interval = time::interval(config.ping_interval);
    // The first tick fires immediately; skip it so a fresh connection is
    // not pinged before it finished the handshake.
    interval.tick().await;

    loop {
        interval.tick().await;

        if !handle.is_alive() {
            break;
        }

        let silence = Utc::now() - handle.last_pong();
        if let Ok(silence) = silence.to_std() {
            if silence > config.ping_timeout {
                tracing::warn!(
                    conn_id = %handle.id,
                    silence_secs = silence.as_secs(),
                    "Heartbeat timeout, marking connection closed"
                );
                handle.mark_closed();
                break;
            }
        }

        let ping = OutboundEvent::Ping {
            timestamp: Utc::now().timestamp_millis(),
        };
        let Ok(frame) = serde_json::to_string(&ping) else {
            break;
        };
        if !handle.send(frame) {
            tracing::debug!(conn_id = %handle.id, "Ping send failed, marking closed");
            handle.mark_closed();
            break;
        }
    }

    tracing::debug!(conn_id = %handle.id, "Heartbeat loop ended");
}
