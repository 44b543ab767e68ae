use super::SnapshotInfo;
use crate::text_format::{Text, TextFormat, TextWriter};
use std::fmt;
use strum_macros::IntoStaticStr;

/// What a `CDB2_SQLRESPONSE` carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ResponseType {
    ColumnNames = 1,
    ColumnValues = 2,
    LastRow = 3,
    #[strum(serialize = "COMDB2_INFO")]
    Comdb2Info = 4,
    SpTrace = 5,
    SpDebug = 6,
    RawData = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(i32)]
pub enum ColumnType {
    Integer = 1,
    Real = 2,
    Cstring = 3,
    Blob = 4,
    Datetime = 6,
    Intervalym = 7,
    Intervalds = 8,
    Datetimeus = 9,
    Intervaldsus = 10,
}

/// Server response to a SQL request (`CDB2_SQLRESPONSE`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SqlResponse {
    #[prost(enumeration = "ResponseType", optional, tag = "1")]
    pub response_type: Option<i32>,
    #[prost(message, repeated, tag = "2")]
    pub value: Vec<Column>,
    #[prost(message, optional, tag = "3")]
    pub dbinforesponse: Option<DbInfoResponse>,
    #[prost(int32, optional, tag = "4")]
    pub error_code: Option<i32>,
    #[prost(string, optional, tag = "5")]
    pub error_string: Option<String>,
    #[prost(message, optional, tag = "6")]
    pub effects: Option<Effects>,
    #[prost(message, optional, tag = "7")]
    pub snapshot_info: Option<SnapshotInfo>,
    #[prost(uint64, optional, tag = "8")]
    pub row_id: Option<u64>,
    #[prost(string, repeated, tag = "9")]
    pub info_string: Vec<String>,
    #[prost(int32, repeated, packed = "false", tag = "10")]
    pub features: Vec<i32>,
}

impl SqlResponse {
    /// The response type, if present and known.
    pub fn kind(&self) -> Option<ResponseType> {
        self.response_type
            .and_then(|value| ResponseType::try_from(value).ok())
    }

    pub fn is_column_names(&self) -> bool {
        self.kind() == Some(ResponseType::ColumnNames)
    }

    pub fn is_column_values(&self) -> bool {
        self.kind() == Some(ResponseType::ColumnValues)
    }
}

impl TextFormat for SqlResponse {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.enumeration::<ResponseType>("response_type", self.response_type)?;
        w.messages("value", &self.value)?;
        w.message("dbinforesponse", self.dbinforesponse.as_ref())?;
        w.scalar("error_code", self.error_code)?;
        w.string("error_string", self.error_string.as_deref())?;
        w.message("effects", self.effects.as_ref())?;
        w.message("snapshot_info", self.snapshot_info.as_ref())?;
        w.scalar("row_id", self.row_id)?;
        w.strings("info_string", &self.info_string)?;
        w.scalars("features", &self.features)
    }
}

impl fmt::Display for SqlResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Text(self), f)
    }
}

/// One column of a result row, or one column name in a `COLUMN_NAMES` response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Column {
    #[prost(enumeration = "ColumnType", optional, tag = "1")]
    pub r#type: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub value: Option<Vec<u8>>,
    #[prost(bool, optional, tag = "3")]
    pub isnull: Option<bool>,
}

impl TextFormat for Column {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.enumeration::<ColumnType>("type", self.r#type)?;
        w.bytes("value", self.value.as_deref())?;
        w.scalar("isnull", self.isnull)
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DbInfoResponse {
    #[prost(message, optional, tag = "1")]
    pub master: Option<NodeInfo>,
    #[prost(message, repeated, tag = "2")]
    pub nodes: Vec<NodeInfo>,
    #[prost(bool, optional, tag = "3")]
    pub require_ssl: Option<bool>,
}

impl TextFormat for DbInfoResponse {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.message("master", self.master.as_ref())?;
        w.messages("nodes", &self.nodes)?;
        w.scalar("require_ssl", self.require_ssl)
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeInfo {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(int32, optional, tag = "2")]
    pub number: Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub incoherent: Option<i32>,
    #[prost(int32, optional, tag = "4")]
    pub room: Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub port: Option<i32>,
}

impl TextFormat for NodeInfo {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.string("name", self.name.as_deref())?;
        w.scalar("number", self.number)?;
        w.scalar("incoherent", self.incoherent)?;
        w.scalar("room", self.room)?;
        w.scalar("port", self.port)
    }
}

/// Row counts of a write statement (`CDB2_EFFECTS`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Effects {
    #[prost(int32, optional, tag = "1")]
    pub num_affected: Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub num_selected: Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub num_updated: Option<i32>,
    #[prost(int32, optional, tag = "4")]
    pub num_deleted: Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub num_inserted: Option<i32>,
}

impl TextFormat for Effects {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result {
        w.scalar("num_affected", self.num_affected)?;
        w.scalar("num_selected", self.num_selected)?;
        w.scalar("num_updated", self.num_updated)?;
        w.scalar("num_deleted", self.num_deleted)?;
        w.scalar("num_inserted", self.num_inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_enum_names() {
        assert_eq!(<&'static str>::from(ResponseType::ColumnNames), "COLUMN_NAMES");
        assert_eq!(<&'static str>::from(ResponseType::Comdb2Info), "COMDB2_INFO");
        assert_eq!(<&'static str>::from(ResponseType::SpTrace), "SP_TRACE");
        assert_eq!(<&'static str>::from(ColumnType::Cstring), "CSTRING");
        assert_eq!(<&'static str>::from(ColumnType::Intervaldsus), "INTERVALDSUS");
    }

    #[test]
    fn test_kind() {
        let names = SqlResponse {
            response_type: Some(ResponseType::ColumnNames as i32),
            ..Default::default()
        };
        assert!(names.is_column_names());
        assert!(!names.is_column_values());

        let unknown = SqlResponse {
            response_type: Some(99),
            ..Default::default()
        };
        assert_eq!(unknown.kind(), None);
        assert_eq!(SqlResponse::default().kind(), None);
    }

    #[test]
    fn test_response_text() {
        let rsp = SqlResponse {
            response_type: Some(ResponseType::ColumnNames as i32),
            value: vec![
                Column {
                    r#type: Some(ColumnType::Integer as i32),
                    value: Some(b"id\0".to_vec()),
                    isnull: None,
                },
                Column {
                    r#type: Some(42),
                    value: Some(b"name\0".to_vec()),
                    isnull: Some(false),
                },
            ],
            error_code: Some(0),
            ..Default::default()
        };
        let decoded = SqlResponse::decode(rsp.encode_to_vec().as_slice()).unwrap();
        let expected = "\
response_type: COLUMN_NAMES
value {
  type: INTEGER
  value: \"id\\000\"
}
value {
  type: 42
  value: \"name\\000\"
  isnull: false
}
error_code: 0
";
        assert_eq!(decoded.to_string(), expected);
    }

    #[test]
    fn test_unknown_response_type_prints_number() {
        let rsp = SqlResponse {
            response_type: Some(77),
            effects: Some(Effects {
                num_affected: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            rsp.to_string(),
            "response_type: 77\neffects {\n  num_affected: 3\n}\n"
        );
    }
}
