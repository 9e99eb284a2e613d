//! Channel registry — manages all channels and their memberships.

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

use super::channel::Channel;
use super::id::ChannelId;
use super::subscriptions::SubscriptionTracker;

/// Registry of all active broadcast channels.
///
/// Join and leave are idempotent; channels are created on first join and
/// removed when their last member leaves.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    /// Channel id → channel.
    channels: DashMap<ChannelId, Channel>,
    /// Reverse index (connection → channels).
    memberships: SubscriptionTracker,
}

impl ChannelRegistry {
    /// Creates a new channel registry.
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
            memberships: SubscriptionTracker::new(),
        }
    }

    /// Joins a connection to a channel. Joining twice is a no-op.
    pub fn join(&self, channel_id: ChannelId, conn_id: ConnectionId) {
        self.channels
            .entry(channel_id)
            .or_insert_with(|| Channel::new(channel_id))
            .join(conn_id);

        self.memberships.add(conn_id, channel_id);
    }

    /// Removes a connection from a channel. Leaving a channel the
    /// connection never joined is a no-op.
    ///
    /// The emptiness check and the reap happen under the channel's entry
    /// lock, so a join racing this call either keeps the channel alive or
    /// recreates it afterwards — its membership is never silently dropped.
    pub fn leave(&self, channel_id: ChannelId, conn_id: ConnectionId) {
        self.reap_member(&channel_id, conn_id);
        self.memberships.remove(conn_id, &channel_id);
    }

    /// Removes a connection from every channel it joined.
    pub fn leave_all(&self, conn_id: ConnectionId) {
        let channels = self.memberships.remove_all(conn_id);
        for channel_id in &channels {
            self.reap_member(channel_id, conn_id);
        }
    }

    /// Drops one member and reaps the channel if that emptied it, all
    /// under a single entry lock.
    fn reap_member(&self, channel_id: &ChannelId, conn_id: ConnectionId) {
        if let dashmap::mapref::entry::Entry::Occupied(mut occupied) =
            self.channels.entry(*channel_id)
        {
            occupied.get_mut().leave(conn_id);
            if occupied.get().is_empty() {
                occupied.remove();
            }
        }
    }

    /// Returns all member connection ids for a channel. An unknown channel
    /// yields an empty list, never an error.
    pub fn members(&self, channel_id: &ChannelId) -> Vec<ConnectionId> {
        self.channels
            .get(channel_id)
            .map(|ch| ch.member_ids())
            .unwrap_or_default()
    }

    /// Returns the member count for a channel.
    pub fn member_count(&self, channel_id: &ChannelId) -> usize {
        self.channels
            .get(channel_id)
            .map(|ch| ch.member_count())
            .unwrap_or(0)
    }

    /// Returns the number of channels a connection has joined.
    pub fn membership_count(&self, conn_id: ConnectionId) -> usize {
        self.memberships.count(conn_id)
    }

    /// Returns total number of active channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use skillswap_core::types::ConversationId;
    use uuid::Uuid;

    fn conversation_channel() -> ChannelId {
        ChannelId::Conversation(ConversationId::new())
    }

    #[test]
    fn test_join_is_idempotent() {
        let registry = ChannelRegistry::new();
        let channel = conversation_channel();
        let conn = Uuid::new_v4();

        registry.join(channel, conn);
        registry.join(channel, conn);

        assert_eq!(registry.member_count(&channel), 1);
        assert_eq!(registry.membership_count(conn), 1);
    }

    #[test]
    fn test_leave_non_member_is_noop() {
        let registry = ChannelRegistry::new();
        let channel = conversation_channel();
        let member = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        registry.join(channel, member);
        registry.leave(channel, stranger);

        assert_eq!(registry.member_count(&channel), 1);
    }

    #[test]
    fn test_empty_channel_is_removed() {
        let registry = ChannelRegistry::new();
        let channel = conversation_channel();
        let conn = Uuid::new_v4();

        registry.join(channel, conn);
        assert_eq!(registry.channel_count(), 1);

        registry.leave(channel, conn);
        assert_eq!(registry.channel_count(), 0);
        assert!(registry.members(&channel).is_empty());
    }

    #[test]
    fn test_concurrent_join_survives_last_member_leaving() {
        use std::sync::Arc;

        let registry = Arc::new(ChannelRegistry::new());

        for _ in 0..10_000 {
            let channel = conversation_channel();
            let leaver = Uuid::new_v4();
            let joiner = Uuid::new_v4();
            registry.join(channel, leaver);

            let leaving = Arc::clone(&registry);
            let joining = Arc::clone(&registry);
            let leave = std::thread::spawn(move || leaving.leave(channel, leaver));
            let join = std::thread::spawn(move || joining.join(channel, joiner));
            leave.join().expect("leave thread");
            join.join().expect("join thread");

            // Whichever order the two land in, the joiner's membership
            // must survive the reap of the emptied channel.
            assert_eq!(registry.members(&channel), vec![joiner]);
            registry.leave(channel, joiner);
        }
    }

    #[test]
    fn test_leave_all_clears_every_membership() {
        let registry = ChannelRegistry::new();
        let first = conversation_channel();
        let second = conversation_channel();
        let conn = Uuid::new_v4();
        let other = Uuid::new_v4();

        registry.join(first, conn);
        registry.join(second, conn);
        registry.join(second, other);

        registry.leave_all(conn);

        assert_eq!(registry.membership_count(conn), 0);
        assert_eq!(registry.members(&second), vec![other]);
        // `first` had no other members and is gone entirely.
        assert_eq!(registry.channel_count(), 1);
    }
}
