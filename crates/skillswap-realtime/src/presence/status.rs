//! Presence status definitions.

use serde::{Deserialize, Serialize};

/// User presence status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    /// User is connected and reachable.
    Online,
    /// User has marked themselves as away.
    Away,
    /// User does not want to be disturbed.
    Busy,
    /// User has marked themselves as invisible while connected.
    Offline,
}

impl PresenceStatus {
    /// Parses from a client-supplied string.
    ///
    /// Returns `None` for anything outside the closed status set; the
    /// caller treats that as a silent no-op rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "online" => Some(Self::Online),
            "away" => Some(Self::Away),
            "busy" => Some(Self::Busy),
            "offline" => Some(Self::Offline),
            _ => None,
        }
    }

    /// Converts to the wire string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Busy => "busy",
            Self::Offline => "offline",
        }
    }
}
