//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use cdb2net_lib::error::DumpError;
#[allow(unused_imports)]
pub use cdb2net_lib::schema::{Column, ColumnType, Query, ResponseType, SqlQuery, SqlResponse};
#[allow(unused_imports)]
pub use cdb2net_lib::{Summary, run};
#[allow(unused_imports)]
pub use prost::Message;

/// Wrap bytes the way the event logger writes blobs: `x'<hex>'`
#[allow(dead_code)]
pub fn blob(bytes: &[u8]) -> String {
    format!("x'{}'", hex::encode(bytes))
}

/// One event-log line for a network event
#[allow(dead_code)]
pub fn net_line(dir: &str, id: i64, msg: &str, data: &[u8]) -> String {
    serde_json::json!({
        "type": "net",
        "dir": dir,
        "id": id,
        "msg": msg,
        "data": blob(data),
    })
    .to_string()
}

/// Four 32-bit words in little-endian order (request frame header)
#[allow(dead_code)]
pub fn request_header(msg_type: i32, length: i32) -> Vec<u8> {
    [msg_type, 0, 0, length]
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect()
}

/// Four 32-bit words in big-endian order (response frame header)
#[allow(dead_code)]
pub fn response_header(msg_type: i32, length: i32) -> Vec<u8> {
    [msg_type, 0, 0, length]
        .iter()
        .flat_map(|w| w.to_be_bytes())
        .collect()
}

#[allow(dead_code)]
pub fn sql_query(text: &str) -> Vec<u8> {
    Query {
        sqlquery: Some(SqlQuery {
            dbname: Some("testdb".to_string()),
            sql_query: Some(text.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
    .encode_to_vec()
}

#[allow(dead_code)]
pub fn column_names(names: &[&str]) -> SqlResponse {
    SqlResponse {
        response_type: Some(ResponseType::ColumnNames as i32),
        value: names
            .iter()
            .map(|name| Column {
                r#type: Some(ColumnType::Cstring as i32),
                value: Some(name.as_bytes().to_vec()),
                isnull: None,
            })
            .collect(),
        error_code: Some(0),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn column_values(values: &[&str]) -> SqlResponse {
    SqlResponse {
        response_type: Some(ResponseType::ColumnValues as i32),
        value: values
            .iter()
            .map(|value| Column {
                r#type: None,
                value: Some(value.as_bytes().to_vec()),
                isnull: Some(false),
            })
            .collect(),
        error_code: Some(0),
        ..Default::default()
    }
}

/// Run the decoder over `lines` and return the trace
#[allow(dead_code)]
pub fn dump(lines: &[String]) -> String {
    let input = lines.join("\n");
    let mut out = Vec::new();
    run(input.as_bytes(), &mut out).expect("dump failed");
    String::from_utf8(out).expect("trace is not UTF-8")
}
