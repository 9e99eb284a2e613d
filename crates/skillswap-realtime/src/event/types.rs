//! Inbound and outbound wire event definitions.
//!
//! Both enums are closed: an event name outside them is a parse error,
//! answered with an `error` event rather than silently ignored. The tag
//! and field casing match the platform's existing clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use skillswap_core::types::{ConversationId, MessageId, NotificationId, UserId};

use crate::presence::registry::PresenceSnapshot;
use crate::presence::status::PresenceStatus;

/// Display identity attached to presence and call-signaling payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    pub avatar: Option<String>,
}

/// Events sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InboundEvent {
    /// Join a conversation channel. The REST layer authorizes participancy
    /// before telling the client to join; this layer does not re-check.
    JoinConversation {
        /// Conversation to join.
        conversation_id: ConversationId,
    },
    /// Leave a conversation channel.
    LeaveConversation {
        /// Conversation to leave.
        conversation_id: ConversationId,
    },
    /// Typing indicator.
    Typing {
        /// Conversation being typed in.
        conversation_id: ConversationId,
        /// Whether typing started or stopped.
        is_typing: bool,
    },
    /// Read receipt for a message.
    MessageRead {
        /// Message that was read.
        message_id: MessageId,
        /// Conversation it belongs to.
        conversation_id: ConversationId,
    },
    /// Start a call: send an offer to another user.
    CallUser {
        /// Callee.
        to: UserId,
        /// Session offer (opaque to this layer).
        offer: Value,
        /// "video" or "audio".
        call_type: String,
    },
    /// Answer an incoming call.
    AnswerCall {
        /// Caller.
        to: UserId,
        /// Session answer (opaque to this layer).
        answer: Value,
    },
    /// Reject an incoming call.
    RejectCall {
        /// Caller.
        to: UserId,
    },
    /// Hang up an ongoing call.
    EndCall {
        /// Other party.
        to: UserId,
    },
    /// ICE candidate relay for call setup.
    IceCandidate {
        /// Other party.
        to: UserId,
        /// Candidate (opaque to this layer).
        candidate: Value,
    },
    /// Send a skill-exchange request to another user.
    SkillRequest {
        /// Target user.
        to: UserId,
        /// Request details (opaque to this layer).
        skill_data: Value,
    },
    /// Acknowledge a notification was seen. The durable read-state update
    /// belongs to the REST layer; this is acknowledged and logged only.
    NotificationRead {
        /// Notification that was read.
        notification_id: NotificationId,
    },
    /// Change own presence status.
    UpdateStatus {
        /// Requested status; unknown values are silently ignored.
        status: String,
    },
    /// Request the current presence list.
    GetOnlineUsers,
    /// Keepalive reply.
    Pong {
        /// Echoed server timestamp, unix milliseconds.
        timestamp: i64,
    },
}

/// Events sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum OutboundEvent {
    /// A user came online (first device only).
    UserOnline {
        /// User id.
        user_id: UserId,
        /// Display identity.
        user: UserSummary,
    },
    /// A user went offline (last device).
    UserOffline {
        /// User id.
        user_id: UserId,
        /// Display identity.
        user: UserSummary,
        /// When they were last seen.
        last_seen: DateTime<Utc>,
    },
    /// A user changed status.
    UserStatusUpdate {
        /// User id.
        user_id: UserId,
        /// New status.
        status: PresenceStatus,
    },
    /// Someone is typing in a conversation.
    UserTyping {
        /// Typist.
        user_id: UserId,
        /// Typist display identity.
        user: UserSummary,
        /// Whether typing started or stopped.
        is_typing: bool,
    },
    /// A message was read by its recipient (fanned to the conversation).
    MessageReadReceipt {
        /// Message that was read.
        message_id: MessageId,
        /// Who read it.
        read_by: UserId,
        /// When.
        read_at: DateTime<Utc>,
    },
    /// Incoming call offer.
    IncomingCall {
        /// Caller id.
        from: UserId,
        /// Caller display identity.
        caller: UserSummary,
        /// Session offer.
        offer: Value,
        /// "video" or "audio".
        call_type: String,
    },
    /// Call was answered.
    CallAnswered {
        /// Callee id.
        from: UserId,
        /// Session answer.
        answer: Value,
    },
    /// Call was rejected.
    CallRejected {
        /// Rejecting user.
        from: UserId,
    },
    /// Call ended.
    CallEnded {
        /// Hanging-up user.
        from: UserId,
    },
    /// ICE candidate relay.
    IceCandidate {
        /// Sending party.
        from: UserId,
        /// Candidate.
        candidate: Value,
    },
    /// A skill-exchange request arrived.
    NewSkillRequest {
        /// Requester id.
        from: UserId,
        /// Requester display identity.
        requester: UserSummary,
        /// Request details.
        skill_data: Value,
    },
    /// Reply to `getOnlineUsers`.
    OnlineUsers {
        /// Current presence list.
        users: Vec<PresenceSnapshot>,
    },
    /// A message was persisted for this user (REST-side write).
    NewMessage {
        /// The persisted message document.
        message: Value,
        /// Owning conversation.
        conversation: ConversationId,
    },
    /// A notification was persisted for this user (REST-side write).
    NewNotification {
        /// Notification fields, spread into the payload.
        #[serde(flatten)]
        notification: Value,
    },
    /// A sent message was read (REST-side write, to the sender).
    MessageRead {
        /// Message that was read.
        message_id: MessageId,
        /// When.
        read_at: DateTime<Utc>,
    },
    /// A message was soft-deleted (REST-side write, to the recipient).
    MessageDeleted {
        /// Deleted message.
        message_id: MessageId,
    },
    /// Server keepalive.
    Ping {
        /// Server timestamp, unix milliseconds.
        timestamp: i64,
    },
    /// A problem with an inbound frame.
    Error {
        /// Machine-readable code.
        code: String,
        /// Human-readable description.
        message: String,
    },
}
