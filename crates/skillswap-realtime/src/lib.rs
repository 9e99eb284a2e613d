//! # skillswap-realtime
//!
//! Real-time engine for the SkillSwap platform. Provides:
//!
//! - Connection lifecycle management with a pre-upgrade authentication gate
//! - An in-memory presence registry with multi-device connection counting
//! - Personal and conversation broadcast channels with explicit join/leave
//! - Typed inbound/outbound event routing (typing, read receipts, call
//!   signaling, status updates)
//! - A delivery coordinator bridging the REST layer's durable writes to
//!   at-most-once real-time emissions
//!
//! The engine holds all state in process memory; multi-node fan-out is
//! delegated to an external pub/sub backbone in front of the gateway.

pub mod bridge;
pub mod channel;
pub mod connection;
pub mod event;
pub mod metrics;
pub mod presence;
pub mod server;

pub use bridge::delivery::DeliveryCoordinator;
pub use channel::registry::ChannelRegistry;
pub use connection::gate::AuthenticationGate;
pub use connection::manager::ConnectionManager;
pub use event::router::EventRouter;
pub use presence::registry::PresenceRegistry;
pub use server::RealtimeEngine;
