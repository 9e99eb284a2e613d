//! Shared helpers for realtime engine tests.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use skillswap_core::config::realtime::RealtimeConfig;
use skillswap_core::types::{UserId, UserProfile};
use skillswap_realtime::connection::{ConnectionHandle, ConnectionId};
use skillswap_realtime::RealtimeEngine;

/// One registered connection and its outbound frame stream.
pub struct TestClient {
    pub user_id: UserId,
    pub handle: Arc<ConnectionHandle>,
    pub rx: mpsc::Receiver<String>,
}

impl TestClient {
    pub fn conn_id(&self) -> ConnectionId {
        self.handle.id
    }

    /// Next buffered outbound event, parsed, or `None` if the buffer is
    /// empty. Fan-out is synchronous, so frames are visible immediately.
    pub fn next_event(&mut self) -> Option<Value> {
        let frame = self.rx.try_recv().ok()?;
        Some(serde_json::from_str(&frame).expect("outbound frame is valid JSON"))
    }

    /// All buffered outbound events.
    pub fn events(&mut self) -> Vec<Value> {
        let mut out = Vec::new();
        while let Some(event) = self.next_event() {
            out.push(event);
        }
        out
    }

    /// Discards everything buffered so far.
    pub fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }

    /// Next buffered event of the given name, skipping others.
    pub fn next_named(&mut self, name: &str) -> Option<Value> {
        while let Some(event) = self.next_event() {
            if event["event"] == name {
                return Some(event);
            }
        }
        None
    }
}

pub fn new_engine() -> RealtimeEngine {
    RealtimeEngine::new(RealtimeConfig::default())
}

pub fn new_engine_with(config: RealtimeConfig) -> RealtimeEngine {
    RealtimeEngine::new(config)
}

/// Registers a fresh user with one connection.
pub fn connect(engine: &RealtimeEngine, name: &str) -> TestClient {
    connect_as(engine, UserId::new(), name)
}

/// Registers another connection for an existing user.
pub fn connect_as(engine: &RealtimeEngine, user_id: UserId, name: &str) -> TestClient {
    let (handle, rx) = engine
        .connections
        .register(user_id, UserProfile::new(name, None));
    TestClient {
        user_id,
        handle,
        rx,
    }
}

/// Routes a raw client frame through the engine as `client`.
pub fn send(engine: &RealtimeEngine, client: &TestClient, raw: &str) {
    engine.router.route(client.conn_id(), raw);
}
