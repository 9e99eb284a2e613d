//! Typed channel identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use skillswap_core::types::{ConversationId, UserId};

/// A named broadcast group.
///
/// Two kinds exist: the personal channel every connection joins
/// automatically at register time, and conversation channels joined and
/// left explicitly by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ChannelId {
    /// Personal channel — direct notifications, messages, call signaling.
    User(UserId),
    /// Conversation channel — typing indicators and read receipts.
    Conversation(ConversationId),
}

impl ChannelId {
    /// Parses a channel string (`user:{uuid}` or `conversation:{uuid}`).
    pub fn parse(channel: &str) -> Option<Self> {
        let (kind, id) = channel.split_once(':')?;
        match kind {
            "user" => id.parse().ok().map(ChannelId::User),
            "conversation" => id.parse().ok().map(ChannelId::Conversation),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::User(id) => write!(f, "user:{id}"),
            ChannelId::Conversation(id) => write!(f, "conversation:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let user = ChannelId::User(UserId::new());
        let conversation = ChannelId::Conversation(ConversationId::new());

        assert_eq!(ChannelId::parse(&user.to_string()), Some(user));
        assert_eq!(ChannelId::parse(&conversation.to_string()), Some(conversation));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(ChannelId::parse("user:not-a-uuid"), None);
        assert_eq!(ChannelId::parse("room:123"), None);
        assert_eq!(ChannelId::parse("user"), None);
    }
}
