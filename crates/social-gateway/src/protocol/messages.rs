//! Gateway frame format

use super::{HelloPayload, IdentifyPayload, OpCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use social_core::DomainEvent;

/// Event name of the dispatch that completes Identify
pub const READY: &str = "READY";

/// A single gateway frame: `{op, t?, s?, d?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: OpCode,

    /// Event type (only for op=0 Dispatch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Sequence number (only for op=0 Dispatch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Event data payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl GatewayMessage {
    // === Server Messages ===

    /// Create a Dispatch message (op=0)
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, sequence: u64, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch,
            t: Some(event_type.into()),
            s: Some(sequence),
            d: Some(data),
        }
    }

    /// Dispatch carrying a domain event
    #[must_use]
    pub fn event(event: DomainEvent, sequence: u64) -> Self {
        let event_type = event.event_type();
        Self::dispatch(event_type, sequence, event.into_payload())
    }

    /// Create a Hello message (op=10)
    #[must_use]
    pub fn hello(payload: HelloPayload) -> Self {
        Self {
            op: OpCode::Hello,
            t: None,
            s: None,
            d: serde_json::to_value(payload).ok(),
        }
    }

    /// Create a Heartbeat ACK message (op=11)
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self {
            op: OpCode::HeartbeatAck,
            t: None,
            s: None,
            d: None,
        }
    }

    /// Create an Invalid Session message (op=9)
    #[must_use]
    pub fn invalid_session() -> Self {
        Self {
            op: OpCode::InvalidSession,
            t: None,
            s: None,
            d: Some(Value::Bool(false)),
        }
    }

    // === Parsing Client Messages ===

    /// Try to parse as an Identify payload (op=2)
    pub fn as_identify(&self) -> Option<IdentifyPayload> {
        if self.op != OpCode::Identify {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// The client's last received sequence carried by a Heartbeat (op=1)
    pub fn as_heartbeat_seq(&self) -> Option<Option<u64>> {
        if self.op != OpCode::Heartbeat {
            return None;
        }
        Some(self.d.as_ref().and_then(Value::as_u64))
    }

    // === Utilities ===

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.t, self.s) {
            (Some(t), Some(s)) => write!(f, "GatewayMessage(op={}, t={t}, s={s})", self.op),
            (Some(t), None) => write!(f, "GatewayMessage(op={}, t={t})", self.op),
            _ => write!(f, "GatewayMessage(op={})", self.op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_dispatch_uses_event_name() {
        let msg = GatewayMessage::event(DomainEvent::MessageCreate(json!({"text": "hi"})), 3);

        assert_eq!(msg.op, OpCode::Dispatch);
        assert_eq!(msg.t.as_deref(), Some("MESSAGE_CREATE"));
        assert_eq!(msg.s, Some(3));
        assert_eq!(msg.d.unwrap()["text"], "hi");
    }

    #[test]
    fn test_server_frames_omit_empty_fields() {
        let ack = GatewayMessage::heartbeat_ack().to_json().unwrap();
        assert_eq!(ack, r#"{"op":11}"#);

        let hello = GatewayMessage::hello(HelloPayload::with_interval(30_000))
            .to_json()
            .unwrap();
        assert_eq!(hello, r#"{"op":10,"d":{"heartbeatInterval":30000}}"#);

        let invalid = GatewayMessage::invalid_session();
        assert_eq!(invalid.op, OpCode::InvalidSession);
        assert_eq!(invalid.d, Some(Value::Bool(false)));
    }

    #[test]
    fn test_parse_identify() {
        let msg = GatewayMessage::from_json(r#"{"op":2,"d":{"token":"Bearer xyz"}}"#).unwrap();
        let identify = msg.as_identify().unwrap();
        assert_eq!(identify.bare_token(), "xyz");

        let missing = GatewayMessage::from_json(r#"{"op":2}"#).unwrap();
        assert!(missing.as_identify().is_none());

        let wrong_op = GatewayMessage::from_json(r#"{"op":1,"d":{"token":"x"}}"#).unwrap();
        assert!(wrong_op.as_identify().is_none());
    }

    #[test]
    fn test_parse_heartbeat() {
        let msg = GatewayMessage::from_json(r#"{"op":1,"d":41}"#).unwrap();
        assert_eq!(msg.as_heartbeat_seq(), Some(Some(41)));

        let null = GatewayMessage::from_json(r#"{"op":1,"d":null}"#).unwrap();
        assert_eq!(null.as_heartbeat_seq(), Some(None));
    }

    #[test]
    fn test_unknown_opcode_fails_to_decode() {
        assert!(GatewayMessage::from_json(r#"{"op":4}"#).is_err());
        assert!(GatewayMessage::from_json("not json").is_err());
    }

    #[test]
    fn test_message_display() {
        let dispatch = GatewayMessage::dispatch(READY, 1, json!({}));
        let display = dispatch.to_string();
        assert!(display.contains("READY"));
        assert!(display.contains("s=1"));
    }
}
