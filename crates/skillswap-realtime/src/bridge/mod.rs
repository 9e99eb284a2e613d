//! Bridges between the realtime engine and the rest of the platform.

pub mod delivery;

pub use delivery::DeliveryCoordinator;
