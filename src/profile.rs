//! HTTP-backed profile lookup against the platform REST layer.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use skillswap_core::config::profile::ProfileServiceConfig;
use skillswap_core::error::AppError;
use skillswap_core::traits::ProfileStore;
use skillswap_core::types::{UserId, UserProfile};

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    name: String,
    #[serde(default)]
    avatar: Option<String>,
}

/// Fetches profile snapshots from the platform's internal user API.
#[derive(Debug, Clone)]
pub struct HttpProfileStore {
    client: reqwest::Client,
    base_url: String,
    internal_token: Option<String>,
}

impl HttpProfileStore {
    /// Builds a store from configuration.
    pub fn new(config: &ProfileServiceConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Profile client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            internal_token: config.internal_token.clone(),
        })
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn load_profile(&self, user_id: UserId) -> Result<UserProfile, AppError> {
        let url = format!("{}/internal/users/{}/profile", self.base_url, user_id);
        debug!(user_id = %user_id, "Fetching profile snapshot");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.internal_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Profile service request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Profile service returned {}",
                response.status()
            )));
        }

        let profile: ProfileResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Profile response malformed: {e}")))?;

        Ok(UserProfile::new(profile.name, profile.avatar))
    }
}
