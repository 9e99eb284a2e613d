//! Typed inbound/outbound events and their routing rules.

pub mod router;
pub mod types;
pub mod validate;

pub use router::EventRouter;
pub use types::{InboundEvent, OutboundEvent};
