//! User presence tracking.

pub mod registry;
pub mod status;

pub use registry::{PresenceRegistry, PresenceSnapshot};
pub use status::PresenceStatus;
