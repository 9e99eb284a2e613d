//! Profile lookup collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{UserId, UserProfile};

/// Loads the display profile snapshot for a user.
///
/// Implementations must return an [`ErrorKind::NotFound`] error when the
/// user id does not resolve to an existing account — the connection gate
/// turns that into its `UnknownUser` rejection.
///
/// [`ErrorKind::NotFound`]: crate::error::ErrorKind::NotFound
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the profile snapshot for `user_id`.
    async fn load_profile(&self, user_id: UserId) -> AppResult<UserProfile>;
}
