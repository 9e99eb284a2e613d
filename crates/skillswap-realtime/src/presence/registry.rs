//! Presence registry — the single source of truth for who is reachable.
//!
//! An entry exists if and only if the user has at least one active
//! connection. Connection counting, not mere entry presence, decides when
//! the online/offline transitions fire, so a second device connecting does
//! not re-announce an already-online user.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use skillswap_core::types::{UserId, UserProfile};

use super::status::PresenceStatus;

/// Per-user presence state, aggregated over that user's connections.
#[derive(Debug, Clone)]
struct PresenceEntry {
    /// Display profile snapshot taken at first connect.
    profile: UserProfile,
    /// Current status, defaulted to online on connect.
    status: PresenceStatus,
    /// Last presence-relevant activity (connect, status change).
    last_seen: DateTime<Utc>,
    /// Number of active connections owned by this user.
    connections: usize,
}

/// Serializable per-user presence view, returned by `getOnlineUsers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceSnapshot {
    /// User id.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Current status.
    pub status: PresenceStatus,
    /// Last seen timestamp.
    pub last_seen: DateTime<Utc>,
}

/// Tracks presence state for all connected users.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    /// User id → presence entry.
    entries: DashMap<UserId, PresenceEntry>,
}

impl PresenceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Records a new connection for `user_id`.
    ///
    /// Returns `true` only on the 0→1 transition; callers broadcast
    /// `userOnline` on that transition alone.
    pub fn connect(&self, user_id: UserId, profile: UserProfile) -> bool {
        match self.entries.entry(user_id) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.connections += 1;
                entry.last_seen = Utc::now();
                false
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(PresenceEntry {
                    profile,
                    status: PresenceStatus::Online,
                    last_seen: Utc::now(),
                    connections: 1,
                });
                true
            }
        }
    }

    /// Records a closed connection for `user_id`.
    ///
    /// Returns the profile snapshot only on the 1→0 transition, at which
    /// point the entry is removed entirely (not marked offline). The
    /// decrement and the removal happen under one entry lock: a connect
    /// racing this call either lands before the decrement (count stays
    /// above zero, entry kept) or after the removal (fresh entry, new
    /// online transition) — never in between. Calling this for a user
    /// with no entry is an idempotent no-op.
    pub fn disconnect(&self, user_id: UserId) -> Option<UserProfile> {
        match self.entries.entry(user_id) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.connections = entry.connections.saturating_sub(1);
                if entry.connections == 0 {
                    Some(occupied.remove().profile)
                } else {
                    None
                }
            }
            dashmap::mapref::entry::Entry::Vacant(_) => None,
        }
    }

    /// Applies a client-requested status change.
    ///
    /// Unknown status strings and unknown users are silent no-ops; the
    /// returned status is `Some` only when a broadcast should follow.
    pub fn set_status(&self, user_id: UserId, raw_status: &str) -> Option<PresenceStatus> {
        let status = PresenceStatus::parse(raw_status)?;
        let mut entry = self.entries.get_mut(&user_id)?;
        entry.status = status;
        entry.last_seen = Utc::now();
        Some(status)
    }

    /// Returns the profile snapshot for a connected user.
    pub fn profile(&self, user_id: UserId) -> Option<UserProfile> {
        self.entries.get(&user_id).map(|e| e.profile.clone())
    }

    /// Returns a user's current status, if connected.
    pub fn status_of(&self, user_id: UserId) -> Option<PresenceStatus> {
        self.entries.get(&user_id).map(|e| e.status)
    }

    /// Whether the user has at least one active connection.
    pub fn is_online(&self, user_id: UserId) -> bool {
        self.entries.contains_key(&user_id)
    }

    /// Full presence list. No pagination: only currently-connected users
    /// appear here, a small set relative to the user base.
    pub fn snapshot(&self) -> Vec<PresenceSnapshot> {
        self.entries
            .iter()
            .map(|entry| PresenceSnapshot {
                user_id: *entry.key(),
                name: entry.profile.name.clone(),
                avatar: entry.profile.avatar.clone(),
                status: entry.status,
                last_seen: entry.last_seen,
            })
            .collect()
    }

    /// Number of users with at least one connection.
    pub fn online_count(&self) -> usize {
        self.entries.len()
    }

    /// Drops every entry without broadcasting. Shutdown only.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
