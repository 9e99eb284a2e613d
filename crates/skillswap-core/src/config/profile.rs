//! Profile service collaborator configuration.

use serde::{Deserialize, Serialize};

/// Profile service (platform REST layer) client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileServiceConfig {
    /// Base URL of the platform's internal API.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// Shared secret sent as a bearer token on internal calls, if required.
    #[serde(default)]
    pub internal_token: Option<String>,
}

fn default_timeout() -> u64 {
    5
}
