//! Membership tracking — which connections belong to which channels.

use std::collections::HashSet;

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

use super::id::ChannelId;

/// Reverse index from connection to joined channels, used to tear down
/// every membership in one pass on disconnect.
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    /// Connection id → set of joined channels.
    conn_to_channels: DashMap<ConnectionId, HashSet<ChannelId>>,
}

impl SubscriptionTracker {
    /// Creates a new tracker.
    pub fn new() -> Self {
        Self {
            conn_to_channels: DashMap::new(),
        }
    }

    /// Records a membership.
    pub fn add(&self, conn_id: ConnectionId, channel: ChannelId) {
        self.conn_to_channels
            .entry(conn_id)
            .or_default()
            .insert(channel);
    }

    /// Removes a membership.
    pub fn remove(&self, conn_id: ConnectionId, channel: &ChannelId) {
        if let Some(mut channels) = self.conn_to_channels.get_mut(&conn_id) {
            channels.remove(channel);
        }
    }

    /// Returns all channels a connection has joined.
    pub fn channels_of(&self, conn_id: ConnectionId) -> HashSet<ChannelId> {
        self.conn_to_channels
            .get(&conn_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Returns the number of memberships for a connection.
    pub fn count(&self, conn_id: ConnectionId) -> usize {
        self.conn_to_channels
            .get(&conn_id)
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }

    /// Removes and returns all memberships for a connection.
    pub fn remove_all(&self, conn_id: ConnectionId) -> HashSet<ChannelId> {
        self.conn_to_channels
            .remove(&conn_id)
            .map(|(_, channels)| channels)
            .unwrap_or_default()
    }
}
