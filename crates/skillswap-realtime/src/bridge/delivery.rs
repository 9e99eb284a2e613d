//! Delivery coordinator.
//!
//! Bridges the REST layer's durable writes to real-time emissions. Every
//! emission here is at-most-once over live connections: the durable record
//! already exists, so an offline recipient simply fetches it later. The
//! boolean results report liveness, not failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::debug;

use skillswap_core::types::{ConversationId, MessageId, UserId};

use crate::connection::manager::ConnectionManager;
use crate::event::types::OutboundEvent;
use crate::presence::registry::{PresenceRegistry, PresenceSnapshot};

/// Emits server-originated events on behalf of the REST layer.
#[derive(Debug, Clone)]
pub struct DeliveryCoordinator {
    connections: Arc<ConnectionManager>,
    presence: Arc<PresenceRegistry>,
}

impl DeliveryCoordinator {
    /// Creates a new coordinator.
    pub fn new(connections: Arc<ConnectionManager>, presence: Arc<PresenceRegistry>) -> Self {
        Self {
            connections,
            presence,
        }
    }

    /// Emits an event to all of a user's connections.
    ///
    /// Returns `true` if at least one connection accepted it.
    pub fn emit_to_user(&self, user_id: UserId, event: &OutboundEvent) -> bool {
        self.connections.send_to_user(user_id, event)
    }

    /// Emits an event to a conversation channel.
    pub fn emit_to_conversation(
        &self,
        conversation_id: ConversationId,
        event: &OutboundEvent,
        exclude_user: Option<UserId>,
    ) {
        self.connections
            .send_to_conversation(conversation_id, event, exclude_user);
    }

    /// Returns the current presence list.
    pub fn online_users(&self) -> Vec<PresenceSnapshot> {
        self.presence.snapshot()
    }

    /// Announces a freshly persisted message to its recipient: the message
    /// itself plus a notification payload for clients not viewing the
    /// conversation. Returns whether the recipient was reachable live.
    pub fn message_delivered(
        &self,
        recipient: UserId,
        sender_name: &str,
        conversation_id: ConversationId,
        message: Value,
    ) -> bool {
        let delivered = self.emit_to_user(
            recipient,
            &OutboundEvent::NewMessage {
                message,
                conversation: conversation_id,
            },
        );

        self.emit_to_user(
            recipient,
            &OutboundEvent::NewNotification {
                notification: json!({
                    "type": "message",
                    "title": "New Message",
                    "message": format!("{sender_name} sent you a message"),
                    "data": { "conversationId": conversation_id },
                }),
            },
        );

        if !delivered {
            debug!(recipient = %recipient, "Recipient offline, message delivery deferred to fetch");
        }
        delivered
    }

    /// Tells a message's sender it was read.
    pub fn message_read(
        &self,
        sender: UserId,
        message_id: MessageId,
        read_at: DateTime<Utc>,
    ) -> bool {
        self.emit_to_user(
            sender,
            &OutboundEvent::MessageRead {
                message_id,
                read_at,
            },
        )
    }

    /// Tells a message's recipient it was deleted.
    pub fn message_deleted(&self, recipient: UserId, message_id: MessageId) -> bool {
        self.emit_to_user(recipient, &OutboundEvent::MessageDeleted { message_id })
    }

    /// Pushes a freshly persisted notification to its recipient.
    pub fn notification_created(&self, recipient: UserId, notification: Value) -> bool {
        self.emit_to_user(recipient, &OutboundEvent::NewNotification { notification })
    }
}
