//! # skillswap-auth
//!
//! JWT credential verification for the SkillSwap real-time gateway.
//!
//! The platform REST layer issues and refreshes tokens; this crate only
//! verifies them against the shared HMAC secret and resolves the owning
//! user id, implementing the [`CredentialVerifier`] collaborator trait.
//!
//! [`CredentialVerifier`]: skillswap_core::traits::CredentialVerifier

pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::JwtVerifier;
