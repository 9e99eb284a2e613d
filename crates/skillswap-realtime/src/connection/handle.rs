//! Individual connection handle.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use skillswap_core::types::UserId;

/// Unique connection identifier, assigned at register time.
pub type ConnectionId = Uuid;

/// A handle to a single transport connection.
///
/// Holds the sender half of the outbound frame channel plus the owning
/// user. Frames are already-serialized JSON; serialization happens once
/// per fan-out, not once per member.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection id.
    pub id: ConnectionId,
    /// User who owns this connection.
    pub user_id: UserId,
    /// Sender for outbound frames.
    pub sender: mpsc::Sender<String>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Last pong received, unix milliseconds.
    last_pong_ms: AtomicI64,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Creates a new connection handle.
    pub fn new(user_id: UserId, sender: mpsc::Sender<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            sender,
            connected_at: now,
            last_pong_ms: AtomicI64::new(now.timestamp_millis()),
            alive: AtomicBool::new(true),
        }
    }

    /// Queues an outbound frame for this connection.
    ///
    /// Returns `false` if the connection is dead or its buffer is full; a
    /// slow consumer loses frames rather than stalling the fan-out.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Checks if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Marks the connection as closed.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Records a pong response.
    pub fn record_pong(&self) {
        self.last_pong_ms
            .store(Utc::now().timestamp_millis(), Ordering::SeqCst);
    }

    /// Returns the last pong time.
    pub fn last_pong(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_pong_ms.load(Ordering::SeqCst))
            .unwrap_or(self.connected_at)
    }
}
