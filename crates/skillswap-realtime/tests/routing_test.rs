//! Event routing tests: conversation channels, typing, read receipts,
//! call signaling, and malformed-frame handling.

mod helpers;

use serde_json::json;

use skillswap_core::types::ConversationId;

fn join(engine: &skillswap_realtime::RealtimeEngine, client: &helpers::TestClient, conv: ConversationId) {
    helpers::send(
        engine,
        client,
        &json!({"event": "joinConversation", "conversationId": conv}).to_string(),
    );
}

#[test]
fn test_typing_fans_to_conversation_excluding_sender() {
    let engine = helpers::new_engine();
    let mut ada = helpers::connect(&engine, "ada");
    let mut brin = helpers::connect(&engine, "brin");
    let mut carol = helpers::connect(&engine, "carol");
    let conv = ConversationId::new();

    join(&engine, &ada, conv);
    join(&engine, &brin, conv);
    ada.drain();
    brin.drain();
    carol.drain();

    helpers::send(
        &engine,
        &ada,
        &json!({"event": "typing", "conversationId": conv, "isTyping": true}).to_string(),
    );

    let typing = brin.next_event().expect("userTyping for member");
    assert_eq!(typing["event"], "userTyping");
    assert_eq!(typing["userId"], ada.user_id.to_string());
    assert_eq!(typing["user"]["name"], "ada");
    assert_eq!(typing["isTyping"], true);

    // Sender and non-members see nothing.
    assert!(ada.next_event().is_none());
    assert!(carol.next_event().is_none());
}

#[test]
fn test_sender_excluded_on_every_device() {
    let engine = helpers::new_engine();
    let ada = helpers::connect(&engine, "ada");
    let mut ada_phone = helpers::connect_as(&engine, ada.user_id, "ada");
    let mut brin = helpers::connect(&engine, "brin");
    let conv = ConversationId::new();

    join(&engine, &ada, conv);
    join(&engine, &ada_phone, conv);
    join(&engine, &brin, conv);
    ada_phone.drain();
    brin.drain();

    helpers::send(
        &engine,
        &ada,
        &json!({"event": "typing", "conversationId": conv, "isTyping": true}).to_string(),
    );

    // Exclusion is by user, not by connection: the phone stays silent too.
    assert!(ada_phone.next_event().is_none());
    assert!(brin.next_named("userTyping").is_some());
}

#[test]
fn test_leave_conversation_stops_fan_out() {
    let engine = helpers::new_engine();
    let ada = helpers::connect(&engine, "ada");
    let mut brin = helpers::connect(&engine, "brin");
    let conv = ConversationId::new();

    join(&engine, &ada, conv);
    join(&engine, &brin, conv);
    helpers::send(
        &engine,
        &brin,
        &json!({"event": "leaveConversation", "conversationId": conv}).to_string(),
    );
    brin.drain();

    helpers::send(
        &engine,
        &ada,
        &json!({"event": "typing", "conversationId": conv, "isTyping": true}).to_string(),
    );

    assert!(brin.next_event().is_none());
}

#[test]
fn test_message_read_receipt_reaches_other_members() {
    let engine = helpers::new_engine();
    let ada = helpers::connect(&engine, "ada");
    let mut brin = helpers::connect(&engine, "brin");
    let conv = ConversationId::new();
    let message_id = skillswap_core::types::MessageId::new();

    join(&engine, &ada, conv);
    join(&engine, &brin, conv);
    brin.drain();

    helpers::send(
        &engine,
        &ada,
        &json!({"event": "messageRead", "messageId": message_id, "conversationId": conv}).to_string(),
    );

    let receipt = brin.next_event().expect("messageReadReceipt");
    assert_eq!(receipt["event"], "messageReadReceipt");
    assert_eq!(receipt["messageId"], message_id.to_string());
    assert_eq!(receipt["readBy"], ada.user_id.to_string());
    assert!(receipt["readAt"].is_string());
}

#[test]
fn test_call_signaling_relays_to_callee_connections() {
    let engine = helpers::new_engine();
    let mut ada = helpers::connect(&engine, "ada");
    let mut brin = helpers::connect(&engine, "brin");
    let mut brin_phone = helpers::connect_as(&engine, brin.user_id, "brin");
    ada.drain();
    brin.drain();
    brin_phone.drain();

    helpers::send(
        &engine,
        &ada,
        &json!({
            "event": "callUser",
            "to": brin.user_id,
            "offer": {"sdp": "v=0"},
            "callType": "video",
        })
        .to_string(),
    );

    for callee in [&mut brin, &mut brin_phone] {
        let call = callee.next_event().expect("incomingCall on each device");
        assert_eq!(call["event"], "incomingCall");
        assert_eq!(call["from"], ada.user_id.to_string());
        assert_eq!(call["caller"]["name"], "ada");
        assert_eq!(call["offer"]["sdp"], "v=0");
        assert_eq!(call["callType"], "video");
    }

    helpers::send(
        &engine,
        &brin,
        &json!({"event": "answerCall", "to": ada.user_id, "answer": {"sdp": "v=0"}}).to_string(),
    );
    let answered = ada.next_event().expect("callAnswered");
    assert_eq!(answered["event"], "callAnswered");
    assert_eq!(answered["from"], brin.user_id.to_string());

    helpers::send(
        &engine,
        &brin,
        &json!({"event": "endCall", "to": ada.user_id}).to_string(),
    );
    let ended = ada.next_event().expect("callEnded");
    assert_eq!(ended["event"], "callEnded");
}

#[test]
fn test_call_to_offline_user_is_dropped() {
    let engine = helpers::new_engine();
    let mut ada = helpers::connect(&engine, "ada");
    ada.drain();

    helpers::send(
        &engine,
        &ada,
        &json!({
            "event": "callUser",
            "to": skillswap_core::types::UserId::new(),
            "offer": {},
            "callType": "audio",
        })
        .to_string(),
    );

    // Signaling to an absent user is a silent no-op for the caller.
    assert!(ada.next_event().is_none());
}

#[test]
fn test_skill_request_relays_with_requester_identity() {
    let engine = helpers::new_engine();
    let ada = helpers::connect(&engine, "ada");
    let mut brin = helpers::connect(&engine, "brin");
    brin.drain();

    helpers::send(
        &engine,
        &ada,
        &json!({
            "event": "skillRequest",
            "to": brin.user_id,
            "skillData": {"skill": "rust", "hours": 2},
        })
        .to_string(),
    );

    let request = brin.next_event().expect("newSkillRequest");
    assert_eq!(request["event"], "newSkillRequest");
    assert_eq!(request["from"], ada.user_id.to_string());
    assert_eq!(request["requester"]["name"], "ada");
    assert_eq!(request["skillData"]["skill"], "rust");
}

#[test]
fn test_malformed_frame_earns_error_event() {
    let engine = helpers::new_engine();
    let mut ada = helpers::connect(&engine, "ada");
    ada.drain();

    helpers::send(&engine, &ada, "not json at all");

    let error = ada.next_event().expect("error frame");
    assert_eq!(error["event"], "error");
    assert_eq!(error["code"], "invalidEvent");
}

#[test]
fn test_unknown_event_name_earns_error_event() {
    let engine = helpers::new_engine();
    let mut ada = helpers::connect(&engine, "ada");
    ada.drain();

    helpers::send(&engine, &ada, r#"{"event":"selfDestruct"}"#);

    let error = ada.next_event().expect("error frame");
    assert_eq!(error["event"], "error");
    assert_eq!(error["code"], "invalidEvent");
}

#[test]
fn test_oversized_frame_earns_error_event() {
    let config = skillswap_core::config::realtime::RealtimeConfig {
        max_event_bytes: 32,
        ..Default::default()
    };
    let engine = helpers::new_engine_with(config);
    let mut ada = helpers::connect(&engine, "ada");
    ada.drain();

    let huge = format!(r#"{{"event":"getOnlineUsers","pad":"{}"}}"#, "x".repeat(64));
    helpers::send(&engine, &ada, &huge);

    let error = ada.next_event().expect("error frame");
    assert_eq!(error["code"], "invalidFrame");
}

#[test]
fn test_pong_refreshes_liveness() {
    let engine = helpers::new_engine();
    let ada = helpers::connect(&engine, "ada");

    let before = ada.handle.last_pong();
    std::thread::sleep(std::time::Duration::from_millis(5));
    helpers::send(&engine, &ada, r#"{"event":"pong","timestamp":12345}"#);

    assert!(ada.handle.last_pong() > before);
}

#[test]
fn test_disconnect_cleans_up_channel_memberships() {
    let engine = helpers::new_engine();
    let ada = helpers::connect(&engine, "ada");
    let conv = ConversationId::new();
    join(&engine, &ada, conv);

    engine.connections.unregister(&ada.conn_id());

    assert_eq!(engine.channels.channel_count(), 0);
}
