//! Wire types for the stdin/stdout command protocol.
//!
//! One JSON object per line in both directions. Requests carry an `action`
//! name and an open `params` mapping; responses always carry `ok` as the
//! discriminant, with action-specific fields on success and `error` (plus
//! optional `detail`) on failure.

use serde::Deserialize;
use serde_json::{json, Map, Value};

/// A decoded request line.
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    pub action: String,
    /// Per-action parameter mapping; absent means empty.
    #[serde(default)]
    pub params: Value,
}

/// Decode one input line into a [`Command`].
pub fn decode_line(line: &str) -> Result<Command, serde_json::Error> {
    serde_json::from_str(line)
}

/// The one-time startup record emitted before any input is read.
pub fn ready() -> Value {
    json!({ "ready": true })
}

/// Build a success response, merging the handler's action-specific fields
/// into `{"ok": true}`.
pub fn success(fields: Value) -> Value {
    let mut map = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    map.insert("ok".to_string(), Value::Bool(true));
    Value::Object(map)
}

/// Build a failure response.
pub fn failure(error: impl Into<String>) -> Value {
    json!({ "ok": false, "error": error.into() })
}

/// Build a failure response with extra context in `detail`.
pub fn failure_with_detail(error: impl Into<String>, detail: impl Into<String>) -> Value {
    json!({ "ok": false, "error": error.into(), "detail": detail.into() })
}
