//! Single channel with subscriber tracking.

use std::collections::HashSet;

use crate::connection::handle::ConnectionId;

use super::id::ChannelId;

/// A single broadcast channel with a set of member connections.
#[derive(Debug, Clone)]
pub struct Channel {
    /// Channel identifier.
    pub id: ChannelId,
    /// Set of member connection ids.
    pub members: HashSet<ConnectionId>,
}

impl Channel {
    /// Creates a new empty channel.
    pub fn new(id: ChannelId) -> Self {
        Self {
            id,
            members: HashSet::new(),
        }
    }

    /// Adds a member. Idempotent.
    pub fn join(&mut self, conn_id: ConnectionId) {
        self.members.insert(conn_id);
    }

    /// Removes a member. Idempotent.
    pub fn leave(&mut self, conn_id: ConnectionId) {
        self.members.remove(&conn_id);
    }

    /// Returns member count.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the channel has any members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns all member connection ids.
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().copied().collect()
    }
}
