//! Presence lifecycle tests: online/offline announcements, multi-device
//! counting, status updates, and the online-user listing.

mod helpers;

use skillswap_core::config::realtime::RealtimeConfig;

#[test]
fn test_first_connection_announces_user_online_to_others_only() {
    let engine = helpers::new_engine();
    let mut ada = helpers::connect(&engine, "ada");
    let mut brin = helpers::connect(&engine, "brin");

    // Ada was alone when she connected: nothing buffered for her except
    // Brin's later announcement.
    let ada_events = ada.events();
    assert_eq!(ada_events.len(), 1);
    assert_eq!(ada_events[0]["event"], "userOnline");
    assert_eq!(ada_events[0]["userId"], brin.user_id.to_string());
    assert_eq!(ada_events[0]["user"]["name"], "brin");

    // The announcement excludes the newcomer's own connections.
    assert!(brin.next_event().is_none());
}

#[test]
fn test_second_device_does_not_reannounce() {
    let engine = helpers::new_engine();
    let mut observer = helpers::connect(&engine, "observer");
    let ada = helpers::connect(&engine, "ada");
    observer.drain();

    let ada_phone = helpers::connect_as(&engine, ada.user_id, "ada");

    assert!(observer.next_event().is_none());
    assert_eq!(engine.presence.online_count(), 2);

    // Closing one device keeps the user online and silent.
    engine.connections.unregister(&ada_phone.conn_id());
    assert!(observer.next_event().is_none());
    assert!(engine.presence.is_online(ada.user_id));

    // Closing the last device announces the offline transition.
    engine.connections.unregister(&ada.conn_id());
    let offline = observer.next_event().expect("userOffline broadcast");
    assert_eq!(offline["event"], "userOffline");
    assert_eq!(offline["userId"], ada.user_id.to_string());
    assert!(offline["lastSeen"].is_string());
    assert!(!engine.presence.is_online(ada.user_id));
}

#[test]
fn test_unregister_is_idempotent() {
    let engine = helpers::new_engine();
    let mut observer = helpers::connect(&engine, "observer");
    let ada = helpers::connect(&engine, "ada");
    observer.drain();

    engine.connections.unregister(&ada.conn_id());
    engine.connections.unregister(&ada.conn_id());

    let offlines: Vec<_> = observer
        .events()
        .into_iter()
        .filter(|e| e["event"] == "userOffline")
        .collect();
    assert_eq!(offlines.len(), 1);
}

#[test]
fn test_status_update_broadcasts_to_others() {
    let engine = helpers::new_engine();
    let mut observer = helpers::connect(&engine, "observer");
    let mut ada = helpers::connect(&engine, "ada");
    observer.drain();

    helpers::send(&engine, &ada, r#"{"event":"updateStatus","status":"busy"}"#);

    let update = observer.next_event().expect("userStatusUpdate broadcast");
    assert_eq!(update["event"], "userStatusUpdate");
    assert_eq!(update["userId"], ada.user_id.to_string());
    assert_eq!(update["status"], "busy");
    assert!(ada.next_event().is_none());
}

#[test]
fn test_invalid_status_is_silently_ignored() {
    let engine = helpers::new_engine();
    let mut observer = helpers::connect(&engine, "observer");
    let ada = helpers::connect(&engine, "ada");
    observer.drain();

    helpers::send(&engine, &ada, r#"{"event":"updateStatus","status":"invisible"}"#);

    assert!(observer.next_event().is_none());
}

#[test]
fn test_get_online_users_replies_to_requester_only() {
    let engine = helpers::new_engine();
    let mut ada = helpers::connect(&engine, "ada");
    let mut brin = helpers::connect(&engine, "brin");
    ada.drain();

    helpers::send(&engine, &ada, r#"{"event":"getOnlineUsers"}"#);

    let reply = ada.next_event().expect("onlineUsers reply");
    assert_eq!(reply["event"], "onlineUsers");
    let users = reply["users"].as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u["status"] == "online"));
    assert!(brin.next_event().is_none());
}

#[test]
fn test_connection_cap_evicts_oldest_without_presence_flap() {
    let config = RealtimeConfig {
        max_connections_per_user: 2,
        ..RealtimeConfig::default()
    };
    let engine = helpers::new_engine_with(config);
    let mut observer = helpers::connect(&engine, "observer");
    let ada = helpers::connect(&engine, "ada");
    let _ada2 = helpers::connect_as(&engine, ada.user_id, "ada");
    observer.drain();

    let _ada3 = helpers::connect_as(&engine, ada.user_id, "ada");

    // Oldest connection got evicted, the user stayed online, and the
    // observer saw neither an offline nor a fresh online announcement.
    assert!(!ada.handle.is_alive());
    assert_eq!(engine.connections.connection_count(), 3);
    assert!(engine.presence.is_online(ada.user_id));
    assert!(observer.next_event().is_none());
}

#[test]
fn test_shutdown_balances_connection_counters() {
    let engine = helpers::new_engine();
    let ada = helpers::connect(&engine, "ada");
    let _ada2 = helpers::connect_as(&engine, ada.user_id, "ada");
    let _brin = helpers::connect(&engine, "brin");

    engine.connections.close_all();

    let snap = engine.metrics.snapshot();
    assert_eq!(snap.connections_opened, 3);
    assert_eq!(snap.connections_closed, snap.connections_opened);
    assert_eq!(engine.connections.connection_count(), 0);
    assert_eq!(engine.presence.online_count(), 0);
}
