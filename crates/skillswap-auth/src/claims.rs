//! JWT claims layout shared with the token issuer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skillswap_core::types::UserId;

/// Claims carried by a platform access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id the token was issued to.
    pub sub: Uuid,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
}

impl Claims {
    /// Returns the owning user id.
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}
