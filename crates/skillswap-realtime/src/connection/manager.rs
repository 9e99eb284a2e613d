//! Connection manager — lifecycle (register, unregister) and fan-out
//! primitives.
//!
//! Handlers run on a multithreaded runtime, so the registries cannot rely
//! on cooperative scheduling for consistency. Every compound mutation
//! (decrement-then-remove in presence, empty-then-reap in channels) is
//! done under a single entry lock inside the owning registry; this layer
//! only sequences the calls.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use skillswap_core::config::realtime::RealtimeConfig;
use skillswap_core::types::{ConversationId, UserId, UserProfile};

use crate::channel::id::ChannelId;
use crate::channel::registry::ChannelRegistry;
use crate::event::types::{OutboundEvent, UserSummary};
use crate::metrics::EngineMetrics;
use crate::presence::registry::PresenceRegistry;

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active connections.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Channel registry.
    channels: Arc<ChannelRegistry>,
    /// Presence registry.
    presence: Arc<PresenceRegistry>,
    /// Metrics.
    metrics: Arc<EngineMetrics>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(
        config: RealtimeConfig,
        channels: Arc<ChannelRegistry>,
        presence: Arc<PresenceRegistry>,
        metrics: Arc<EngineMetrics>,
    ) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            channels,
            presence,
            metrics,
            config,
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// Joins the personal channel unconditionally, records presence, and
    /// announces `userOnline` to everyone else only when this is the
    /// user's first active connection. Returns the handle and the receiver
    /// for outbound frames.
    pub fn register(
        &self,
        user_id: UserId,
        profile: UserProfile,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.send_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, tx));

        self.pool.add(handle.clone());
        let first_connection = self.presence.connect(user_id, profile.clone());
        self.channels.join(ChannelId::User(user_id), handle.id);
        self.metrics.connection_opened();

        // Enforce the per-user cap after adding, so presence never dips to
        // zero and no spurious offline/online pair is broadcast.
        let connections = self.pool.user_connections(user_id);
        if connections.len() > self.config.max_connections_per_user {
            if let Some(oldest) = connections.first() {
                warn!(
                    user_id = %user_id,
                    conn_id = %oldest.id,
                    max = self.config.max_connections_per_user,
                    "User over connection cap, evicting oldest connection"
                );
                self.evict(&oldest.id);
            }
        }

        if first_connection {
            self.broadcast_except(
                user_id,
                &OutboundEvent::UserOnline {
                    user_id,
                    user: summary(user_id, &profile),
                },
            );
        }

        info!(
            conn_id = %handle.id,
            user_id = %user_id,
            first_connection,
            "Connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection and cleans up all its memberships.
    ///
    /// Announces `userOffline` with a fresh last-seen timestamp only when
    /// this was the user's last connection. Unregistering an unknown
    /// connection id is an idempotent no-op.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        let Some(handle) = self.pool.remove(conn_id) else {
            return;
        };
        handle.mark_closed();
        self.channels.leave_all(*conn_id);
        self.metrics.connection_closed();

        if let Some(profile) = self.presence.disconnect(handle.user_id) {
            self.broadcast_except(
                handle.user_id,
                &OutboundEvent::UserOffline {
                    user_id: handle.user_id,
                    user: summary(handle.user_id, &profile),
                    last_seen: Utc::now(),
                },
            );
        }

        info!(
            conn_id = %conn_id,
            user_id = %handle.user_id,
            "Connection unregistered"
        );
    }

    /// Removes a connection without presence bookkeeping side effects
    /// beyond the device-count decrement (cap eviction path).
    fn evict(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_closed();
            self.channels.leave_all(*conn_id);
            self.presence.disconnect(handle.user_id);
            self.metrics.connection_closed();
        }
    }

    /// Sends an event to one specific connection.
    pub fn send_to_connection(&self, conn_id: &ConnectionId, event: &OutboundEvent) -> bool {
        let Some(frame) = self.serialize(event) else {
            return false;
        };
        let Some(handle) = self.pool.get(conn_id) else {
            return false;
        };
        let sent = handle.send(frame);
        if sent {
            self.metrics.events_sent(1);
        }
        sent
    }

    /// Sends an event to every connection a user owns.
    ///
    /// Returns `true` if at least one connection accepted the frame. A
    /// user with no connections yields `false`: a normal outcome, not an
    /// error.
    pub fn send_to_user(&self, user_id: UserId, event: &OutboundEvent) -> bool {
        let connections = self.pool.user_connections(user_id);
        if connections.is_empty() {
            return false;
        }
        let Some(frame) = self.serialize(event) else {
            return false;
        };

        let mut delivered = 0u64;
        for conn in &connections {
            if conn.send(frame.clone()) {
                delivered += 1;
            } else {
                debug!(conn_id = %conn.id, "Frame not accepted by user connection");
            }
        }
        self.metrics.events_sent(delivered);
        delivered > 0
    }

    /// Broadcasts an event to every connection except those owned by
    /// `exclude` — the sender already has local state for its own action.
    pub fn broadcast_except(&self, exclude: UserId, event: &OutboundEvent) {
        let Some(frame) = self.serialize(event) else {
            return;
        };

        let mut delivered = 0u64;
        for conn in self.pool.all_connections() {
            if conn.user_id == exclude {
                continue;
            }
            if conn.send(frame.clone()) {
                delivered += 1;
            }
        }
        self.metrics.events_sent(delivered);
    }

    /// Sends an event to every member of a conversation channel,
    /// excluding every connection of `exclude_user` when given.
    ///
    /// Emitting to an unknown or empty channel is a successful no-op.
    pub fn send_to_conversation(
        &self,
        conversation_id: ConversationId,
        event: &OutboundEvent,
        exclude_user: Option<UserId>,
    ) {
        let members = self.channels.members(&ChannelId::Conversation(conversation_id));
        if members.is_empty() {
            return;
        }
        let Some(frame) = self.serialize(event) else {
            return;
        };

        let mut delivered = 0u64;
        for conn_id in &members {
            let Some(handle) = self.pool.get(conn_id) else {
                continue;
            };
            if exclude_user == Some(handle.user_id) {
                continue;
            }
            if handle.send(frame.clone()) {
                delivered += 1;
            }
        }
        self.metrics.events_sent(delivered);
    }

    /// Closes all connections. Shutdown only: no offline broadcasts.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            conn.mark_closed();
            if self.pool.remove(&conn.id).is_some() {
                self.metrics.connection_closed();
            }
            self.channels.leave_all(conn.id);
        }
        self.presence.clear();
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Returns the number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }

    /// Whether the user has at least one live connection.
    pub fn is_user_connected(&self, user_id: UserId) -> bool {
        !self.pool.user_connections(user_id).is_empty()
    }

    /// Returns the connection pool.
    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }

    fn serialize(&self, event: &OutboundEvent) -> Option<String> {
        match serde_json::to_string(event) {
            Ok(frame) => Some(frame),
            Err(e) => {
                error!(error = %e, "Failed to serialize outbound event");
                None
            }
        }
    }
}

fn summary(user_id: UserId, profile: &UserProfile) -> UserSummary {
    UserSummary {
        id: user_id,
        name: profile.name.clone(),
        avatar: profile.avatar.clone(),
    }
}
