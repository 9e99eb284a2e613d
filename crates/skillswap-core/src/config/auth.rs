//! Credential verification configuration.

use serde::{Deserialize, Serialize};

/// Credential verification configuration.
///
/// The platform REST layer issues the tokens; this process only verifies
/// them, so the secret must match the issuer's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the token issuer.
    pub jwt_secret: String,
    /// Clock-skew leeway in seconds applied to expiry checks.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    5
}
