use crate::constants::{BLOB_PREFIX_LEN, BLOB_SUFFIX_LEN, DIRECTION_IN, NET_EVENT_TYPE};
use crate::error::DumpError;
use bytes::Bytes;
use serde_json::{Map, Value};
use std::fmt;

/// Which way a captured message travelled, as seen from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// `"in"` is inbound; anything else, including non-string values, is outbound.
    pub fn from_json(value: &Value) -> Self {
        match value.as_str() {
            Some(DIRECTION_IN) => Direction::Inbound,
            _ => Direction::Outbound,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Inbound => "->",
            Direction::Outbound => "<-",
        }
    }
}

/// The `msg` discriminant of a network event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Heartbeat,
    Header,
    Payload,
    ResponseHeader,
    Response,
    Other(String),
}

impl MessageKind {
    pub fn from_json(value: &Value) -> Self {
        match value.as_str() {
            Some(kind) => Self::from_name(kind),
            None => MessageKind::Other(value.to_string()),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "hrtbt" => MessageKind::Heartbeat,
            "header" => MessageKind::Header,
            "payload" => MessageKind::Payload,
            "rsphdr" => MessageKind::ResponseHeader,
            "rsp" => MessageKind::Response,
            other => MessageKind::Other(other.to_owned()),
        }
    }
}

/// A captured network event, validated and with its payload hex-decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct NetEvent {
    /// 1-based input line the event came from
    pub line: usize,
    pub id: i64,
    pub direction: Direction,
    pub kind: MessageKind,
    /// The `data` field with its blob-literal framing removed
    pub hex: String,
    pub payload: Bytes,
}

impl NetEvent {
    /// Parse one log line.
    ///
    /// Returns `Ok(None)` for lines that are valid JSON but not a complete
    /// network event. Malformed JSON and required fields of the wrong type are
    /// errors.
    pub fn from_json_line(text: &str, line: usize) -> Result<Option<Self>, DumpError> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| DumpError::Json { line, source })?;
        match value.as_object() {
            Some(object) => Self::from_object(object, line),
            None => Ok(None),
        }
    }

    pub fn from_object(object: &Map<String, Value>, line: usize) -> Result<Option<Self>, DumpError> {
        if object.get("type").and_then(Value::as_str) != Some(NET_EVENT_TYPE) {
            return Ok(None);
        }
        let (Some(dir), Some(msg), Some(data), Some(id)) = (
            object.get("dir"),
            object.get("msg"),
            object.get("data"),
            object.get("id"),
        ) else {
            return Ok(None);
        };

        let id = id.as_i64().ok_or_else(|| DumpError::InvalidField {
            line,
            field: "id",
            reason: format!("expected an integer, got {}", id),
        })?;
        let data = data.as_str().ok_or_else(|| DumpError::InvalidField {
            line,
            field: "data",
            reason: format!("expected a string, got {}", data),
        })?;

        let hex = strip_blob_framing(data);
        let payload = hex::decode(hex).map_err(|source| DumpError::Hex { line, source })?;

        Ok(Some(Self {
            line,
            id,
            direction: Direction::from_json(dir),
            kind: MessageKind::from_json(msg),
            hex: hex.to_owned(),
            payload: Bytes::from(payload),
        }))
    }

    /// Directional prefix written in front of every trace line.
    pub fn prefix(&self) -> Prefix {
        Prefix {
            id: self.id,
            direction: self.direction,
        }
    }
}

/// `[<id>]->` for inbound, `[<id>]<-` for outbound traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    pub id: i64,
    pub direction: Direction,
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.id, self.direction.arrow())
    }
}

/// Strip the `x'` ... `'` framing the event logger puts around blobs.
/// Too-short input strips to the empty string.
pub fn strip_blob_framing(data: &str) -> &str {
    let start = data
        .char_indices()
        .nth(BLOB_PREFIX_LEN)
        .map_or(data.len(), |(idx, _)| idx);
    let end = data
        .char_indices()
        .rev()
        .nth(BLOB_SUFFIX_LEN - 1)
        .map_or(0, |(idx, _)| idx);
    data.get(start..end).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_blob_framing() {
        assert_eq!(strip_blob_framing("x'0a0b'"), "0a0b");
        assert_eq!(strip_blob_framing("x''"), "");
        assert_eq!(strip_blob_framing("\"\""), "");
        assert_eq!(strip_blob_framing("ab"), "");
        assert_eq!(strip_blob_framing(""), "");
        assert_eq!(strip_blob_framing("é'ff'"), "ff");
    }

    #[test]
    fn test_heartbeat_event() {
        let line = r#"{"type":"net","dir":"in","id":7,"msg":"hrtbt","data":"\"\""}"#;
        let event = NetEvent::from_json_line(line, 1).unwrap().unwrap();
        assert_eq!(event.id, 7);
        assert_eq!(event.direction, Direction::Inbound);
        assert_eq!(event.kind, MessageKind::Heartbeat);
        assert!(event.payload.is_empty());
        assert_eq!(event.prefix().to_string(), "[7]->");
    }

    #[test]
    fn test_direction_classification() {
        assert_eq!(Direction::from_json(&Value::from("in")), Direction::Inbound);
        assert_eq!(Direction::from_json(&Value::from("out")), Direction::Outbound);
        assert_eq!(Direction::from_json(&Value::from("IN")), Direction::Outbound);
        assert_eq!(Direction::from_json(&Value::Null), Direction::Outbound);
        assert_eq!(Direction::from_json(&Value::from(1)), Direction::Outbound);
    }

    #[test]
    fn test_message_kinds() {
        for (text, kind) in [
            ("hrtbt", MessageKind::Heartbeat),
            ("header", MessageKind::Header),
            ("payload", MessageKind::Payload),
            ("rsphdr", MessageKind::ResponseHeader),
            ("rsp", MessageKind::Response),
            ("connect", MessageKind::Other("connect".to_string())),
        ] {
            assert_eq!(MessageKind::from_json(&Value::from(text)), kind);
        }
        assert_eq!(
            MessageKind::from_json(&Value::from(3)),
            MessageKind::Other("3".to_string())
        );
    }

    #[test]
    fn test_message_kind_names_are_exact() {
        for name in ["HRTBT", "rsp ", "", "response", "hdr"] {
            assert_eq!(MessageKind::from_name(name), MessageKind::Other(name.to_string()));
        }
        assert_eq!(MessageKind::from_name("rsphdr"), MessageKind::ResponseHeader);
    }

    #[test]
    fn test_float_id_and_spaced_hex_are_fatal() {
        assert!(matches!(
            NetEvent::from_json_line(
                r#"{"type":"net","dir":"in","id":7.0,"msg":"hrtbt","data":"x''"}"#,
                2
            ),
            Err(DumpError::InvalidField { line: 2, field: "id", .. })
        ));
        assert!(matches!(
            NetEvent::from_json_line(
                r#"{"type":"net","dir":"in","id":7,"msg":"payload","data":"x'0a 0b'"}"#,
                3
            ),
            Err(DumpError::Hex { line: 3, .. })
        ));
    }

    #[test]
    fn test_skipped_lines() {
        for line in [
            r#"{"type":"sql","dir":"in","id":1,"msg":"hrtbt","data":"x''"}"#,
            r#"{"dir":"in","id":1,"msg":"hrtbt","data":"x''"}"#,
            r#"{"type":"net","id":1,"msg":"hrtbt","data":"x''"}"#,
            r#"{"type":"net","dir":"in","msg":"hrtbt","data":"x''"}"#,
            r#"{"type":"net","dir":"in","id":1,"data":"x''"}"#,
            r#"{"type":"net","dir":"in","id":1,"msg":"hrtbt"}"#,
            r#"[1, 2, 3]"#,
            r#""net""#,
        ] {
            assert_eq!(NetEvent::from_json_line(line, 1).unwrap(), None, "{}", line);
        }
    }

    #[test]
    fn test_null_dir_counts_as_present() {
        let line = r#"{"type":"net","dir":null,"id":2,"msg":"hrtbt","data":"x''"}"#;
        let event = NetEvent::from_json_line(line, 1).unwrap().unwrap();
        assert_eq!(event.direction, Direction::Outbound);
    }

    #[test]
    fn test_fatal_lines() {
        assert!(matches!(
            NetEvent::from_json_line("{not json", 4),
            Err(DumpError::Json { line: 4, .. })
        ));
        assert!(matches!(
            NetEvent::from_json_line("\n", 5),
            Err(DumpError::Json { line: 5, .. })
        ));
        assert!(matches!(
            NetEvent::from_json_line(
                r#"{"type":"net","dir":"in","id":"x","msg":"hrtbt","data":"x''"}"#,
                6
            ),
            Err(DumpError::InvalidField { line: 6, field: "id", .. })
        ));
        assert!(matches!(
            NetEvent::from_json_line(
                r#"{"type":"net","dir":"in","id":1,"msg":"hrtbt","data":12}"#,
                7
            ),
            Err(DumpError::InvalidField { line: 7, field: "data", .. })
        ));
        assert!(matches!(
            NetEvent::from_json_line(
                r#"{"type":"net","dir":"in","id":1,"msg":"hrtbt","data":"x'zz'"}"#,
                8
            ),
            Err(DumpError::Hex { line: 8, .. })
        ));
    }
}
