//! Internal delivery endpoints called by the REST layer after durable
//! writes. Each returns whether at least one live connection accepted the
//! event; an offline recipient is a normal outcome, not an error.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use skillswap_core::types::{ConversationId, MessageId, UserId};

use crate::state::AppState;

/// Common response for delivery endpoints.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    /// Whether any live connection accepted the event.
    pub delivered: bool,
}

/// POST /internal/events/message-delivered request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDeliveredRequest {
    /// Recipient of the new message.
    pub recipient_id: UserId,
    /// Sender's display name, used in the notification text.
    pub sender_name: String,
    /// Conversation the message belongs to.
    pub conversation_id: ConversationId,
    /// The persisted message document, forwarded as-is.
    pub message: Value,
}

/// POST /internal/events/message-delivered
pub async fn message_delivered(
    State(state): State<AppState>,
    Json(body): Json<MessageDeliveredRequest>,
) -> Json<DeliveryResponse> {
    let delivered = state.engine.delivery.message_delivered(
        body.recipient_id,
        &body.sender_name,
        body.conversation_id,
        body.message,
    );
    Json(DeliveryResponse { delivered })
}

/// POST /internal/events/message-read request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReadRequest {
    /// Original sender, who receives the read confirmation.
    pub sender_id: UserId,
    /// Message that was read.
    pub message_id: MessageId,
    /// When it was read.
    pub read_at: DateTime<Utc>,
}

/// POST /internal/events/message-read
pub async fn message_read(
    State(state): State<AppState>,
    Json(body): Json<MessageReadRequest>,
) -> Json<DeliveryResponse> {
    let delivered = state
        .engine
        .delivery
        .message_read(body.sender_id, body.message_id, body.read_at);
    Json(DeliveryResponse { delivered })
}

/// POST /internal/events/message-deleted request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDeletedRequest {
    /// Recipient to inform.
    pub recipient_id: UserId,
    /// Deleted message.
    pub message_id: MessageId,
}

/// POST /internal/events/message-deleted
pub async fn message_deleted(
    State(state): State<AppState>,
    Json(body): Json<MessageDeletedRequest>,
) -> Json<DeliveryResponse> {
    let delivered = state
        .engine
        .delivery
        .message_deleted(body.recipient_id, body.message_id);
    Json(DeliveryResponse { delivered })
}

/// POST /internal/events/notification request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Recipient of the notification.
    pub recipient_id: UserId,
    /// Persisted notification fields, forwarded flattened.
    pub notification: Value,
}

/// POST /internal/events/notification
pub async fn notification(
    State(state): State<AppState>,
    Json(body): Json<NotificationRequest>,
) -> Json<DeliveryResponse> {
    let delivered = state
        .engine
        .delivery
        .notification_created(body.recipient_id, body.notification);
    Json(DeliveryResponse { delivered })
}
