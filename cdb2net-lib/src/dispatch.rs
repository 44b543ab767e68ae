//! Turns validated network events into trace lines.

use crate::error::DumpError;
use crate::event::{MessageKind, NetEvent};
use crate::frame::{FrameHeader, RequestType, ResponseHeaderType};
use crate::headers::HeaderCache;
use crate::reader::EventReader;
use crate::schema::{Query, SqlResponse};
use prost::Message;
use std::fmt;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::{trace, warn};

/// The decoded form of one network event.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Heartbeat,
    /// Request frame header
    Request(RequestType),
    /// Request payload
    Query(Query),
    /// Response frame header
    ResponseHeader(ResponseHeaderType),
    /// Response header that could not be unpacked; carries the raw hex text
    UnframedResponse(String),
    Response(Rc<SqlResponse>),
    /// A `COLUMN_VALUES` response and the column names cached for its connection
    Row {
        values: Rc<SqlResponse>,
        headers: Option<Rc<SqlResponse>>,
    },
    /// An event with an unrecognised `msg` kind
    Unknown(String),
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Heartbeat => writeln!(f, "heartbeat"),
            Decoded::Request(request) => writeln!(f, "{}", request),
            Decoded::Query(query) => writeln!(f, "{}", query),
            Decoded::ResponseHeader(response) => writeln!(f, "{}", response),
            Decoded::UnframedResponse(hex) => writeln!(f, "unknown response: {}", hex),
            Decoded::Response(response) => writeln!(f, "{}", response),
            Decoded::Row { values, headers } => {
                writeln!(f, "{}", values)?;
                match headers {
                    Some(headers) => writeln!(f, "headers for msg: {}", headers),
                    None => writeln!(f, "headers for msg: None"),
                }
            }
            Decoded::Unknown(kind) => writeln!(f, "unknown event {}", kind),
        }
    }
}

/// Decodes events one at a time, remembering column names per connection.
#[derive(Debug, Default)]
pub struct Dispatcher {
    headers: HeaderCache,
    decoded: usize,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `event`, updating the header cache as a side effect.
    pub fn decode(&mut self, event: &NetEvent) -> Result<Decoded, DumpError> {
        trace!("line {}: [{}] {:?}", event.line, event.id, event.kind);
        let decoded = match &event.kind {
            MessageKind::Heartbeat => Decoded::Heartbeat,
            MessageKind::Header => {
                let header = FrameHeader::decode_request(&event.payload).map_err(|source| {
                    DumpError::Frame {
                        line: event.line,
                        source,
                    }
                })?;
                Decoded::Request(header.request_type())
            }
            MessageKind::Payload => {
                let query = Query::decode(event.payload.clone()).map_err(|source| {
                    DumpError::Decode {
                        line: event.line,
                        message: "CDB2_QUERY",
                        source,
                    }
                })?;
                if query.carries_sql_query() {
                    self.headers.clear(event.id);
                }
                Decoded::Query(query)
            }
            MessageKind::ResponseHeader => match FrameHeader::decode_response(&event.payload) {
                Ok(header) => Decoded::ResponseHeader(header.response_type()),
                Err(e) => {
                    warn!("line {}: response header not unpacked: {}", event.line, e);
                    Decoded::UnframedResponse(event.hex.clone())
                }
            },
            MessageKind::Response => {
                let response = SqlResponse::decode(event.payload.clone()).map_err(|source| {
                    DumpError::Decode {
                        line: event.line,
                        message: "CDB2_SQLRESPONSE",
                        source,
                    }
                })?;
                let response = Rc::new(response);
                if response.is_column_names() {
                    self.headers.set(event.id, Rc::clone(&response));
                }
                if response.is_column_values() {
                    Decoded::Row {
                        headers: self.headers.get(event.id).cloned(),
                        values: response,
                    }
                } else {
                    Decoded::Response(response)
                }
            }
            MessageKind::Other(kind) => Decoded::Unknown(kind.clone()),
        };
        self.decoded += 1;
        Ok(decoded)
    }

    /// Decode `event` and write its trace line(s) to `out`.
    pub fn dispatch<W: Write>(&mut self, event: &NetEvent, out: &mut W) -> Result<(), DumpError> {
        let decoded = self.decode(event)?;
        write!(out, "{}{}", event.prefix(), decoded)?;
        Ok(())
    }

    pub fn headers(&self) -> &HeaderCache {
        &self.headers
    }

    /// Events decoded so far
    pub fn decoded(&self) -> usize {
        self.decoded
    }
}

/// Counters for a finished dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub events: usize,
    pub skipped: usize,
    pub connections: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines read, {} events decoded, {} lines skipped, {} connections tracked",
            self.lines, self.events, self.skipped, self.connections
        )
    }
}

/// Decode every network event in `input`, writing the trace to `output`.
///
/// Stops at the first fatal error; everything decoded up to that point has
/// already been written.
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<Summary, DumpError> {
    let mut reader = EventReader::new(input);
    let mut dispatcher = Dispatcher::new();

    while let Some(event) = reader.next_event()? {
        dispatcher.dispatch(&event, output)?;
    }
    output.flush()?;

    Ok(Summary {
        lines: reader.lines_read(),
        events: dispatcher.decoded(),
        skipped: reader.skipped(),
        connections: dispatcher.headers().len(),
    })
}
