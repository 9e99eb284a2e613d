//! Broadcast channel system: personal channels and conversation channels.

pub mod channel;
pub mod id;
pub mod registry;
pub mod subscriptions;

pub use id::ChannelId;
pub use registry::ChannelRegistry;
