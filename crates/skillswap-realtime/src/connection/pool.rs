//! Connection pool — all active connections indexed by id and by user.

use std::sync::Arc;

use dashmap::DashMap;

use skillswap_core::types::UserId;

use super::handle::{ConnectionHandle, ConnectionId};

/// Thread-safe pool of all active connections.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    /// User id → connection handles in registration order (multi-device).
    by_user: DashMap<UserId, Vec<Arc<ConnectionHandle>>>,
    /// Connection id → handle for direct lookup.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// Creates a new empty connection pool.
    pub fn new() -> Self {
        Self {
            by_user: DashMap::new(),
            by_id: DashMap::new(),
        }
    }

    /// Adds a connection to the pool.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_id.insert(handle.id, handle.clone());
        self.by_user.entry(handle.user_id).or_default().push(handle);
    }

    /// Removes a connection from the pool.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.by_id.remove(conn_id)?;
        if let Some(mut connections) = self.by_user.get_mut(&handle.user_id) {
            connections.retain(|c| c.id != *conn_id);
            if connections.is_empty() {
                drop(connections);
                self.by_user.remove(&handle.user_id);
            }
        }
        Some(handle)
    }

    /// Gets a specific connection by id.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(conn_id).map(|entry| entry.value().clone())
    }

    /// Gets all connections for a user, oldest first.
    pub fn user_connections(&self, user_id: UserId) -> Vec<Arc<ConnectionHandle>> {
        self.by_user
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Returns all connection handles.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns total number of active connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    /// Returns number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc;

    fn handle_for(user_id: UserId) -> Arc<ConnectionHandle> {
        let (tx, _rx) = mpsc::channel(1);
        // Receiver is dropped; these tests only exercise the indexes.
        Arc::new(ConnectionHandle::new(user_id, tx))
    }

    #[tokio::test]
    async fn test_add_and_remove_keep_indexes_consistent() {
        let pool = ConnectionPool::new();
        let user = UserId::new();
        let first = handle_for(user);
        let second = handle_for(user);

        pool.add(first.clone());
        pool.add(second.clone());
        assert_eq!(pool.connection_count(), 2);
        assert_eq!(pool.user_count(), 1);

        pool.remove(&first.id);
        assert_eq!(pool.user_connections(user).len(), 1);
        assert_eq!(pool.user_count(), 1);

        pool.remove(&second.id);
        assert_eq!(pool.user_count(), 0);
        assert!(pool.user_connections(user).is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_connection_is_noop() {
        let pool = ConnectionPool::new();
        assert!(pool.remove(&uuid::Uuid::new_v4()).is_none());
    }

    #[tokio::test]
    async fn test_user_connections_are_oldest_first() {
        let pool = ConnectionPool::new();
        let user = UserId::new();
        let first = handle_for(user);
        let second = handle_for(user);

        pool.add(first.clone());
        pool.add(second);

        assert_eq!(pool.user_connections(user)[0].id, first.id);
    }
}
