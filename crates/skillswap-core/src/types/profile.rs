//! Display profile snapshot.

use serde::{Deserialize, Serialize};

/// Read-only display profile snapshot taken at connect time.
///
/// The profile service owns the canonical record; the real-time layer only
/// carries this snapshot on presence and signaling payloads. A rename or
/// avatar change mid-session is picked up on the next connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Avatar URL, if the user has one.
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Creates a profile snapshot.
    pub fn new(name: impl Into<String>, avatar: Option<String>) -> Self {
        Self {
            name: name.into(),
            avatar,
        }
    }
}
