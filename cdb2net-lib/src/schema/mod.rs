//! Typed protobuf schemas for comdb2 client requests and server responses.
//!
//! The structs are declared by hand with `prost` attributes instead of being
//! generated at build time. Every singular field is an explicit `Option`, so a
//! field the peer left out can be told apart from one set to its default.

pub mod query;
pub mod response;

use crate::text_format::{TextFormat, TextWriter};
use std::fmt;

pub use query::{BindValue, ClientInfo, DbInfo, Flag, Query, RequestInfo, SqlQuery};
pub use response::{
    Column, ColumnType, DbInfoResponse, Effects, NodeInfo, ResponseType, SqlResponse,
};

/// Point-in-time snapshot position (log file and offset), used in both
/// directions.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotInfo {
    #[prost(int32, optional, tag = "1")]
    pub file: Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub offset: Option<i32>,
}

impl TextFormat for SnapshotInfo {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.scalar("file", self.file)?;
        w.scalar("offset", self.offset)
    }
}
