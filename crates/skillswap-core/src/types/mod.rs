//! Shared domain types.

pub mod id;
pub mod profile;

pub use id::{ConversationId, MessageId, NotificationId, UserId};
pub use profile::UserProfile;
