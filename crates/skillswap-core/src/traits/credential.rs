//! Credential verification collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::UserId;

/// Verifies a bearer credential and resolves the owning user.
///
/// Implementations must return an [`ErrorKind::Authentication`] error for
/// any credential that is malformed, tampered with, or expired. Token
/// issuance and refresh are not this subsystem's concern.
///
/// [`ErrorKind::Authentication`]: crate::error::ErrorKind::Authentication
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies `token` and returns the user id it was issued to.
    async fn verify(&self, token: &str) -> AppResult<UserId>;
}
