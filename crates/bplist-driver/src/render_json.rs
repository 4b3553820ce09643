use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::SecondsFormat;
use serde_json::{Map, Number, Value as Json, json};

use crate::error::DriverError;
use crate::tree::Node;

/// JSON renderer.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────┐
/// │ Node             │ JSON                                         │
/// ├──────────────────┼──────────────────────────────────────────────┤
/// │ Null             │ null                                         │
/// │ Bool / Int       │ true, false, integer                         │
/// │ Float32/Float64  │ number; NaN and infinities become null       │
/// │ Date             │ RFC 3339 string in UTC                       │
/// │ Data             │ standard base64 string                       │
/// │ String           │ string                                       │
/// │ Uid              │ {"CF$UID": n}                                │
/// │ Array / Dict     │ array / object, keys in encoded order        │
/// └──────────────────┴──────────────────────────────────────────────┘
/// ```
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render `root` as pretty-printed JSON ending in a newline.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Json`] if serialization fails.
    pub fn render(root: &Node<'_>) -> Result<String, DriverError> {
        let mut out = serde_json::to_string_pretty(&to_json(root))?;
        out.push('\n');
        Ok(out)
    }
}

/// Convert a node into a `serde_json::Value`.
pub fn to_json(node: &Node<'_>) -> Json {
    match node {
        Node::Null => Json::Null,
        Node::Bool(b) => Json::Bool(*b),
        Node::Int(i) => Json::from(*i),
        Node::Float32(f) => real(f64::from(*f)),
        Node::Float64(f) => real(*f),
        Node::Date(date) => date.to_utc().map_or_else(
            || Json::String(date.to_string()),
            |utc| Json::String(utc.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        ),
        Node::Data(bytes) => Json::String(STANDARD.encode(bytes)),
        Node::String(s) => Json::String((*s).to_string()),
        Node::Uid(uid) => json!({ "CF$UID": uid }),
        Node::Array(items) => Json::Array(items.iter().map(to_json).collect()),
        Node::Dict(map) => Json::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect::<Map<_, _>>(),
        ),
    }
}

fn real(value: f64) -> Json {
    Number::from_f64(value).map_or(Json::Null, Json::Number)
}
