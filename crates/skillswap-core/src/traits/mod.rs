//! Collaborator traits defined in `skillswap-core` and implemented elsewhere.
//!
//! The real-time core consumes two external collaborators: credential
//! verification and profile lookup. Both are owned by the platform REST
//! layer; these traits are the seam that keeps the core testable without it.

pub mod credential;
pub mod profile;

pub use credential::CredentialVerifier;
pub use profile::ProfileStore;
