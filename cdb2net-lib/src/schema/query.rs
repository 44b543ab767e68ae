use super::SnapshotInfo;
use crate::text_format::{Text, TextFormat, TextWriter};
use std::fmt;

/// Top-level client request (`CDB2_QUERY`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Query {
    #[prost(message, optional, tag = "1")]
    pub sqlquery: Option<SqlQuery>,
    #[prost(message, optional, tag = "2")]
    pub dbinfo: Option<DbInfo>,
    #[prost(string, optional, tag = "3")]
    pub spcmd: Option<String>,
}

impl Query {
    /// True when the request carries SQL text, i.e. starts a new statement.
    pub fn carries_sql_query(&self) -> bool {
        self.sqlquery
            .as_ref()
            .is_some_and(|query| query.sql_query.is_some())
    }
}

impl TextFormat for Query {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.message("sqlquery", self.sqlquery.as_ref())?;
        w.message("dbinfo", self.dbinfo.as_ref())?;
        w.string("spcmd", self.spcmd.as_deref())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Text(self), f)
    }
}

/// A SQL statement with its bind values and session options (`CDB2_SQLQUERY`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SqlQuery {
    #[prost(string, optional, tag = "1")]
    pub dbname: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub sql_query: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub flag: Vec<Flag>,
    #[prost(bool, optional, tag = "4")]
    pub little_endian: Option<bool>,
    #[prost(message, repeated, tag = "5")]
    pub bindvars: Vec<BindValue>,
    #[prost(string, optional, tag = "6")]
    pub tzname: Option<String>,
    #[prost(string, repeated, tag = "7")]
    pub set_flags: Vec<String>,
    #[prost(int32, repeated, packed = "false", tag = "8")]
    pub types: Vec<i32>,
    #[prost(string, optional, tag = "9")]
    pub mach_class: Option<String>,
    #[prost(bytes = "vec", optional, tag = "10")]
    pub cnonce: Option<Vec<u8>>,
    #[prost(message, optional, tag = "11")]
    pub snapshot_info: Option<SnapshotInfo>,
    #[prost(int64, optional, tag = "12")]
    pub skip_rows: Option<i64>,
    #[prost(int32, optional, tag = "13")]
    pub retry: Option<i32>,
    #[prost(int32, repeated, packed = "false", tag = "14")]
    pub features: Vec<i32>,
    #[prost(message, optional, tag = "15")]
    pub client_info: Option<ClientInfo>,
    #[prost(string, repeated, tag = "16")]
    pub context: Vec<String>,
    #[prost(message, optional, tag = "17")]
    pub req_info: Option<RequestInfo>,
}

impl TextFormat for SqlQuery {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.string("dbname", self.dbname.as_deref())?;
        w.string("sql_query", self.sql_query.as_deref())?;
        w.messages("flag", &self.flag)?;
        w.scalar("little_endian", self.little_endian)?;
        w.messages("bindvars", &self.bindvars)?;
        w.string("tzname", self.tzname.as_deref())?;
        w.strings("set_flags", &self.set_flags)?;
        w.scalars("types", &self.types)?;
        w.string("mach_class", self.mach_class.as_deref())?;
        w.bytes("cnonce", self.cnonce.as_deref())?;
        w.message("snapshot_info", self.snapshot_info.as_ref())?;
        w.scalar("skip_rows", self.skip_rows)?;
        w.scalar("retry", self.retry)?;
        w.scalars("features", &self.features)?;
        w.message("client_info", self.client_info.as_ref())?;
        w.strings("context", &self.context)?;
        w.message("req_info", self.req_info.as_ref())
    }
}

/// Session option (`CDB2_FLAG`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Flag {
    #[prost(int32, optional, tag = "1")]
    pub option: Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub value: Option<i32>,
}

impl TextFormat for Flag {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.scalar("option", self.option)?;
        w.scalar("value", self.value)
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BindValue {
    #[prost(string, optional, tag = "1")]
    pub varname: Option<String>,
    #[prost(int32, optional, tag = "2")]
    pub r#type: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub value: Option<Vec<u8>>,
    #[prost(bool, optional, tag = "4")]
    pub isnull: Option<bool>,
    #[prost(int32, optional, tag = "5")]
    pub index: Option<i32>,
}

impl TextFormat for BindValue {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.string("varname", self.varname.as_deref())?;
        w.scalar("type", self.r#type)?;
        w.bytes("value", self.value.as_deref())?;
        w.scalar("isnull", self.isnull)?;
        w.scalar("index", self.index)
    }
}

/// Identity of the client process (`cinfo`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientInfo {
    #[prost(int32, optional, tag = "1")]
    pub pid: Option<i32>,
    #[prost(uint64, optional, tag = "2")]
    pub th_id: Option<u64>,
    #[prost(int32, optional, tag = "3")]
    pub host_id: Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub argv0: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub stack: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub api_driver_name: Option<String>,
    #[prost(string, optional, tag = "7")]
    pub api_driver_version: Option<String>,
}

impl TextFormat for ClientInfo {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.scalar("pid", self.pid)?;
        w.scalar("th_id", self.th_id)?;
        w.scalar("host_id", self.host_id)?;
        w.string("argv0", self.argv0.as_deref())?;
        w.string("stack", self.stack.as_deref())?;
        w.string("api_driver_name", self.api_driver_name.as_deref())?;
        w.string("api_driver_version", self.api_driver_version.as_deref())
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestInfo {
    #[prost(int64, optional, tag = "1")]
    pub timestampus: Option<i64>,
    #[prost(int32, optional, tag = "2")]
    pub num_retries: Option<i32>,
}

impl TextFormat for RequestInfo {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.scalar("timestampus", self.timestampus)?;
        w.scalar("num_retries", self.num_retries)
    }
}

/// Database info request (`CDB2_DBINFO`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DbInfo {
    #[prost(string, optional, tag = "1")]
    pub dbname: Option<String>,
    #[prost(bool, optional, tag = "2")]
    pub little_endian: Option<bool>,
    #[prost(bool, optional, tag = "3")]
    pub want_effects: Option<bool>,
}

impl TextFormat for DbInfo {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.string("dbname", self.dbname.as_deref())?;
        w.scalar("little_endian", self.little_endian)?;
        w.scalar("want_effects", self.want_effects)
    }
}
