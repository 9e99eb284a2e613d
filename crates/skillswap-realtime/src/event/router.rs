//! Inbound event dispatch and fan-out rules.
//!
//! Dispatch is stateless: each frame is handled independently, keyed only
//! by the event variant and the connection's owning user. A malformed
//! frame earns an `error` event and is otherwise dropped; it never tears
//! down the connection or affects any other connection's channels.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use skillswap_core::types::{UserId, UserProfile};

use crate::channel::id::ChannelId;
use crate::channel::registry::ChannelRegistry;
use crate::connection::handle::ConnectionId;
use crate::connection::manager::ConnectionManager;
use crate::event::types::{InboundEvent, OutboundEvent, UserSummary};
use crate::event::validate::validate_frame;
use crate::metrics::EngineMetrics;
use crate::presence::registry::PresenceRegistry;

/// Routes inbound events to their outbound fan-out targets.
#[derive(Debug)]
pub struct EventRouter {
    /// Connection manager (fan-out primitives).
    connections: Arc<ConnectionManager>,
    /// Channel registry (join/leave).
    channels: Arc<ChannelRegistry>,
    /// Presence registry (status, profiles, snapshot).
    presence: Arc<PresenceRegistry>,
    /// Metrics.
    metrics: Arc<EngineMetrics>,
    /// Maximum inbound frame size.
    max_event_bytes: usize,
}

impl EventRouter {
    /// Creates a new router.
    pub fn new(
        connections: Arc<ConnectionManager>,
        channels: Arc<ChannelRegistry>,
        presence: Arc<PresenceRegistry>,
        metrics: Arc<EngineMetrics>,
        max_event_bytes: usize,
    ) -> Self {
        Self {
            connections,
            channels,
            presence,
            metrics,
            max_event_bytes,
        }
    }

    /// Handles one raw inbound frame from `conn_id`.
    pub fn route(&self, conn_id: ConnectionId, raw: &str) {
        let Some(handle) = self.connections.pool().get(&conn_id) else {
            warn!(conn_id = %conn_id, "Frame from unknown connection");
            return;
        };
        let user_id = handle.user_id;
        self.metrics.event_received();

        if let Err(e) = validate_frame(raw, self.max_event_bytes) {
            self.reject(conn_id, "invalidFrame", &e.message);
            return;
        }

        let event: InboundEvent = match serde_json::from_str(raw) {
            Ok(event) => event,
            Err(e) => {
                debug!(conn_id = %conn_id, error = %e, "Unparseable inbound frame");
                self.reject(conn_id, "invalidEvent", "Unrecognized or malformed event");
                return;
            }
        };

        self.dispatch(conn_id, user_id, event);
    }

    fn dispatch(&self, conn_id: ConnectionId, user_id: UserId, event: InboundEvent) {
        match event {
            InboundEvent::JoinConversation { conversation_id } => {
                self.channels
                    .join(ChannelId::Conversation(conversation_id), conn_id);
                debug!(conn_id = %conn_id, conversation_id = %conversation_id, "Joined conversation");
            }
            InboundEvent::LeaveConversation { conversation_id } => {
                self.channels
                    .leave(ChannelId::Conversation(conversation_id), conn_id);
                debug!(conn_id = %conn_id, conversation_id = %conversation_id, "Left conversation");
            }
            InboundEvent::Typing {
                conversation_id,
                is_typing,
            } => {
                self.connections.send_to_conversation(
                    conversation_id,
                    &OutboundEvent::UserTyping {
                        user_id,
                        user: self.summary(user_id),
                        is_typing,
                    },
                    Some(user_id),
                );
            }
            InboundEvent::MessageRead {
                message_id,
                conversation_id,
            } => {
                self.connections.send_to_conversation(
                    conversation_id,
                    &OutboundEvent::MessageReadReceipt {
                        message_id,
                        read_by: user_id,
                        read_at: Utc::now(),
                    },
                    Some(user_id),
                );
            }
            InboundEvent::CallUser {
                to,
                offer,
                call_type,
            } => {
                self.connections.send_to_user(
                    to,
                    &OutboundEvent::IncomingCall {
                        from: user_id,
                        caller: self.summary(user_id),
                        offer,
                        call_type,
                    },
                );
            }
            InboundEvent::AnswerCall { to, answer } => {
                self.connections
                    .send_to_user(to, &OutboundEvent::CallAnswered { from: user_id, answer });
            }
            InboundEvent::RejectCall { to } => {
                self.connections
                    .send_to_user(to, &OutboundEvent::CallRejected { from: user_id });
            }
            InboundEvent::EndCall { to } => {
                self.connections
                    .send_to_user(to, &OutboundEvent::CallEnded { from: user_id });
            }
            InboundEvent::IceCandidate { to, candidate } => {
                self.connections.send_to_user(
                    to,
                    &OutboundEvent::IceCandidate {
                        from: user_id,
                        candidate,
                    },
                );
            }
            InboundEvent::SkillRequest { to, skill_data } => {
                self.connections.send_to_user(
                    to,
                    &OutboundEvent::NewSkillRequest {
                        from: user_id,
                        requester: self.summary(user_id),
                        skill_data,
                    },
                );
            }
            InboundEvent::NotificationRead { notification_id } => {
                debug!(
                    conn_id = %conn_id,
                    notification_id = %notification_id,
                    "Notification read acknowledged"
                );
            }
            InboundEvent::UpdateStatus { status } => {
                if let Some(status) = self.presence.set_status(user_id, &status) {
                    debug!(user_id = %user_id, status = status.as_str(), "Status updated");
                    self.connections
                        .broadcast_except(user_id, &OutboundEvent::UserStatusUpdate { user_id, status });
                }
            }
            InboundEvent::GetOnlineUsers => {
                self.connections.send_to_connection(
                    &conn_id,
                    &OutboundEvent::OnlineUsers {
                        users: self.presence.snapshot(),
                    },
                );
            }
            InboundEvent::Pong { .. } => {
                if let Some(handle) = self.connections.pool().get(&conn_id) {
                    handle.record_pong();
                }
            }
        }
    }

    fn reject(&self, conn_id: ConnectionId, code: &str, message: &str) {
        self.connections.send_to_connection(
            &conn_id,
            &OutboundEvent::Error {
                code: code.to_string(),
                message: message.to_string(),
            },
        );
    }

    fn summary(&self, user_id: UserId) -> UserSummary {
        let profile = self
            .presence
            .profile(user_id)
            .unwrap_or_else(|| UserProfile::new("unknown", None));
        UserSummary {
            id: user_id,
            name: profile.name,
            avatar: profile.avatar,
        }
    }
}
