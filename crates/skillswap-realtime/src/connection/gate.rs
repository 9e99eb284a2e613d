//! Connection authentication gate.
//!
//! Runs before the transport upgrade completes. Unauthenticated transports
//! are not supported: a missing credential is a rejection, never a silent
//! anonymous connection. Presence registration happens only after this
//! gate passes.

use std::sync::Arc;

use thiserror::Error;

use skillswap_core::error::{AppError, ErrorKind};
use skillswap_core::traits::{CredentialVerifier, ProfileStore};
use skillswap_core::types::{UserId, UserProfile};

/// Reason a connection attempt was refused, surfaced to the client before
/// the transport completes so it can distinguish "rejected" from
/// "timed out". No retry is orchestrated at this layer.
#[derive(Debug, Error)]
pub enum GateRejection {
    /// No credential in the handshake.
    #[error("no credential provided")]
    NoCredential,
    /// Credential failed verification (malformed, tampered, expired).
    #[error("invalid or expired credential")]
    InvalidCredential,
    /// Credential verified but the user no longer exists.
    #[error("unknown user")]
    UnknownUser,
    /// A collaborator was unreachable; not the client's fault.
    #[error("authentication collaborator unavailable")]
    Unavailable(#[source] AppError),
}

/// Identity and profile snapshot attached to an admitted connection.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Verified user id.
    pub user_id: UserId,
    /// Display profile snapshot taken now, carried for the session.
    pub profile: UserProfile,
}

/// Validates a bearer credential and resolves the connecting user.
#[derive(Clone)]
pub struct AuthenticationGate {
    /// Credential verification collaborator.
    verifier: Arc<dyn CredentialVerifier>,
    /// Profile lookup collaborator.
    profiles: Arc<dyn ProfileStore>,
}

impl std::fmt::Debug for AuthenticationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGate").finish()
    }
}

impl AuthenticationGate {
    /// Creates a new gate over the given collaborators.
    pub fn new(verifier: Arc<dyn CredentialVerifier>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { verifier, profiles }
    }

    /// Authenticates a connection attempt.
    ///
    /// The credential comes from the handshake auth field or an
    /// authorization header; `None` or an empty string is `NoCredential`.
    pub async fn authenticate(
        &self,
        credential: Option<&str>,
    ) -> Result<AuthenticatedUser, GateRejection> {
        let token = credential
            .filter(|t| !t.is_empty())
            .ok_or(GateRejection::NoCredential)?;

        let user_id = self.verifier.verify(token).await.map_err(|e| {
            if e.is_kind(ErrorKind::Authentication) {
                GateRejection::InvalidCredential
            } else {
                GateRejection::Unavailable(e)
            }
        })?;

        let profile = self.profiles.load_profile(user_id).await.map_err(|e| {
            if e.is_kind(ErrorKind::NotFound) {
                tracing::warn!(user_id = %user_id, "Verified credential for unknown user");
                GateRejection::UnknownUser
            } else {
                GateRejection::Unavailable(e)
            }
        })?;

        Ok(AuthenticatedUser { user_id, profile })
    }
}
