//! Connection lifecycle — authentication gate, handles, pool, manager,
//! keepalive.

pub mod gate;
pub mod handle;
pub mod heartbeat;
pub mod manager;
pub mod pool;

pub use gate::{AuthenticatedUser, AuthenticationGate, GateRejection};
pub use handle::{ConnectionHandle, ConnectionId};
pub use manager::ConnectionManager;
