// Protocol and log-format constants for comdb2 network event logs

/// Size of a request/response frame header (four 32-bit integers)
pub const FRAME_HEADER_SIZE: usize = 16;

/// Characters in front of the hex digits of a logged blob (`x'`)
pub const BLOB_PREFIX_LEN: usize = 2;

/// Characters after the hex digits of a logged blob (`'`)
pub const BLOB_SUFFIX_LEN: usize = 1;

/// Value of the `type` field carried by network events
pub const NET_EVENT_TYPE: &str = "net";

/// Value of the `dir` field for traffic arriving at the server
pub const DIRECTION_IN: &str = "in";
