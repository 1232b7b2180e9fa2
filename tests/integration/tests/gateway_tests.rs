//! Push gateway integration tests
//!
//! Same requirements as `api_tests`; the WebSocket connects to `/gateway` on
//! the server under test.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use integration_tests::{
    assert_status, fixtures::*, server_or_skip, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Next text frame as JSON; `None` once the server closes
async fn next_frame(socket: &mut Socket) -> Option<Value> {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("Timed out waiting for a gateway frame")?;
        match frame.ok()? {
            Message::Text(text) => return serde_json::from_str(text.as_str()).ok(),
            Message::Close(_) => return None,
            _ => {}
        }
    }
}

/// Next frame of the given dispatch type, skipping everything else
async fn next_dispatch(socket: &mut Socket, event: &str) -> Value {
    loop {
        let frame = next_frame(socket).await.expect("Gateway closed");
        if frame["op"] == 0 && frame["t"] == event {
            return frame;
        }
    }
}

async fn connect(server: &TestServer) -> Socket {
    let (mut socket, _) = connect_async(server.gateway_url())
        .await
        .expect("Gateway connect failed");

    let hello = next_frame(&mut socket).await.expect("No hello");
    assert_eq!(hello["op"], 10);
    assert!(hello["d"]["heartbeatInterval"].as_u64().unwrap() > 0);

    socket
}

async fn identify(socket: &mut Socket, token: &str) {
    let frame = json!({ "op": 2, "d": { "token": token } });
    socket.send(Message::Text(frame.to_string().into())).await.unwrap();
}

#[tokio::test]
async fn test_identify_and_ready() {
    let server = server_or_skip!();
    let user = TestUser::register(&server, "gw").await.unwrap();

    let mut socket = connect(&server).await;
    identify(&mut socket, user.token()).await;

    let ready = next_dispatch(&mut socket, "READY").await;
    assert_eq!(ready["s"], 1);
    assert_eq!(ready["d"]["user"]["id"], user.id.as_str());
    assert!(ready["d"]["sessionId"].as_str().is_some());

    socket
        .send(Message::Text(json!({ "op": 1, "d": 1 }).to_string().into()))
        .await
        .unwrap();
    let ack = next_frame(&mut socket).await.unwrap();
    assert_eq!(ack["op"], 11);
}

#[tokio::test]
async fn test_bad_token_is_rejected() {
    let server = server_or_skip!();
    let mut socket = connect(&server).await;
    identify(&mut socket, "not-a-token").await;

    let invalid = next_frame(&mut socket).await.unwrap();
    assert_eq!(invalid["op"], 9);
    assert!(next_frame(&mut socket).await.is_none());
}

#[tokio::test]
async fn test_dispatch_before_identify_closes() {
    let server = server_or_skip!();
    let mut socket = connect(&server).await;

    socket
        .send(Message::Text(json!({ "op": 0, "d": {} }).to_string().into()))
        .await
        .unwrap();
    assert!(next_frame(&mut socket).await.is_none());
}

#[tokio::test]
async fn test_message_and_notification_push() {
    let server = server_or_skip!();
    let alice = TestUser::register(&server, "push_a").await.unwrap();
    let bob = TestUser::register(&server, "push_b").await.unwrap();

    let mut socket = connect(&server).await;
    identify(&mut socket, bob.token()).await;
    next_dispatch(&mut socket, "READY").await;

    let response = server
        .post("/messages", Some(alice.token()), &SendMessageRequest::text(&bob.id, "ping"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let pushed = next_dispatch(&mut socket, "MESSAGE_CREATE").await;
    assert_eq!(pushed["d"]["text"], "ping");
    assert_eq!(pushed["d"]["sender"]["id"], alice.id.as_str());

    let response = server
        .post("/follow", Some(alice.token()), &json!({ "userId": bob.id }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let notification = next_dispatch(&mut socket, "NOTIFICATION_CREATE").await;
    assert_eq!(notification["d"]["type"], "follow");
    assert_eq!(notification["d"]["fromUser"]["id"], alice.id.as_str());
}
