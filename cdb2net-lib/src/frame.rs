use crate::constants::FRAME_HEADER_SIZE;
use crate::error::FrameError;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt;

/// The 16-byte header that precedes every request and response on the wire.
///
/// Requests are logged in the client's (little-endian) order, responses in
/// network (big-endian) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub msg_type: i32,
    pub unused: i32,
    pub state: i32,
    pub length: i32,
}

impl FrameHeader {
    /// Unpack a header using byte order `B`. The input must be exactly
    /// [`FRAME_HEADER_SIZE`] bytes.
    pub fn decode<B: ByteOrder>(data: &[u8]) -> Result<Self, FrameError> {
        if data.len() < FRAME_HEADER_SIZE {
            return Err(FrameError::InsufficientData {
                expected: FRAME_HEADER_SIZE,
                actual: data.len(),
            });
        }
        if data.len() > FRAME_HEADER_SIZE {
            return Err(FrameError::TrailingData {
                expected: FRAME_HEADER_SIZE,
                actual: data.len(),
            });
        }

        let mut words = [0i32; 4];
        B::read_i32_into(data, &mut words);
        let [msg_type, unused, state, length] = words;
        Ok(Self {
            msg_type,
            unused,
            state,
            length,
        })
    }

    /// Unpack a client request header (little-endian).
    pub fn decode_request(data: &[u8]) -> Result<Self, FrameError> {
        Self::decode::<LittleEndian>(data)
    }

    /// Unpack a server response header (big-endian).
    pub fn decode_response(data: &[u8]) -> Result<Self, FrameError> {
        Self::decode::<BigEndian>(data)
    }

    pub fn request_type(&self) -> RequestType {
        RequestType::from_primitive(self.msg_type)
    }

    pub fn response_type(&self) -> ResponseHeaderType {
        ResponseHeaderType::from_primitive(self.msg_type)
    }
}

/// Request types a client sends to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(i32)]
pub enum RequestType {
    Query = 1,
    Reset = 108,
    Ssl = 121,

    #[num_enum(catch_all)]
    Unknown(i32),
}

impl RequestType {
    /// Name used in the trace, or `None` for codes outside the table
    pub fn name(&self) -> Option<&'static str> {
        match self {
            RequestType::Query => Some("query"),
            RequestType::Reset => Some("reset"),
            RequestType::Ssl => Some("ssl"),
            RequestType::Unknown(_) => None,
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "request: {}", name),
            None => write!(f, "unknown request type {}", i32::from(*self)),
        }
    }
}

/// Response types the server sends back to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(i32)]
pub enum ResponseHeaderType {
    Heartbeat = 205,
    SqlResponse = 1002,
    DbInfo = 1005,
    Effects = 1006,
    Ping = 1007,
    Pong = 1008,
    Trace = 1009,
    Ssl = 1010,

    #[num_enum(catch_all)]
    Unknown(i32),
}

impl ResponseHeaderType {
    /// Name used in the trace, or `None` for codes outside the table
    pub fn name(&self) -> Option<&'static str> {
        match self {
            ResponseHeaderType::Heartbeat => Some("heartbeat"),
            ResponseHeaderType::SqlResponse => Some("sql response"),
            ResponseHeaderType::DbInfo => Some("dbinfo"),
            ResponseHeaderType::Effects => Some("effects"),
            ResponseHeaderType::Ping => Some("ping"),
            ResponseHeaderType::Pong => Some("pong"),
            ResponseHeaderType::Trace => Some("trace"),
            ResponseHeaderType::Ssl => Some("ssl"),
            ResponseHeaderType::Unknown(_) => None,
        }
    }
}

impl fmt::Display for ResponseHeaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "response: {}", name),
            None => write!(f, "unknown response type {}", i32::from(*self)),
        }
    }
}
