use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::Formatter;
use serde_json::Value;
use std::collections::HashMap;
use std::io;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const APPLICATION_JSON: &str = "application/json";

/// Invocation event handed to the handler by its host.
///
/// Only `body` is read; any other field the host sends (API Gateway adds
/// plenty) is ignored. `body` stays untyped until the handler decodes it so
/// that a non-string body can be reported as a failure instead of being
/// rejected by the runtime before the handler runs.
///
/// A missing `body` is `None`; `"body": null` is `Some(Value::Null)`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct InboundEvent {
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<Value>,
}

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl InboundEvent {
    pub fn with_body(body: impl Into<String>) -> Self {
        InboundEvent {
            body: Some(Value::String(body.into())),
        }
    }
    pub fn without_body() -> Self {
        InboundEvent::default()
    }
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Decoded request body. A missing `message` decodes to `null`, which the
/// handler treats the same as an empty string.
#[derive(Deserialize, Debug, Default)]
pub struct MessageRequest {
    #[serde(default)]
    pub message: Value,
}

impl MessageRequest {
    /// Falsy values count as "no message": null, false, zero, "", [] and {}.
    pub fn is_empty(&self) -> bool {
        match &self.message {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum ResponseBody {
    Response { response: String },
    Error { error: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Writes `", "` between items and `": "` after keys, the separators
/// Python's `json.dumps` uses, so bodies read `{"error": "..."}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

pub fn to_spaced_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

impl std::fmt::Display for OutboundResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_json = serde_json::json!(self).to_string();
        write!(f, "{as_json}")
    }
}

impl OutboundResponse {
    pub fn json(status_code: u16, body: &ResponseBody) -> Result<Self, serde_json::Error> {
        Ok(OutboundResponse {
            status_code,
            headers: HashMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]),
            body: to_spaced_string(body)?,
        })
    }
    pub fn allow_any_origin(mut self) -> Self {
        self.headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());
        self
    }
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
