use serde_json::Value;
use thiserror::Error;
use tracing::error;

use super::event::{InboundEvent, MessageRequest, OutboundResponse, ResponseBody};

pub const PLACEHOLDER_RESPONSE: &str = "Hello world";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Message is required")]
    MessageRequired,
    #[error("Invalid JSON body: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Request body is null")]
    BodyNull,
    #[error("Request body must be a string, got {0}")]
    BodyNotString(&'static str),
    #[error("Request body must be a JSON object, got {0}")]
    BodyNotObject(&'static str),
    #[error("Event must be a JSON object, got {0}")]
    EventNotObject(&'static str),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MessageRequired => 400,
            _ => 500,
        }
    }
    /// True for failures that are logged and reported as a 500.
    pub fn is_unexpected(&self) -> bool {
        self.status_code() == 500
    }
    fn into_response(self) -> OutboundResponse {
        let status_code = self.status_code();
        let error = if self.is_unexpected() {
            error!("Error: {}", self);
            INTERNAL_SERVER_ERROR
        } else {
            MESSAGE_REQUIRED
        };
        OutboundResponse::json(
            status_code,
            &ResponseBody::Error {
                error: error.to_string(),
            },
        )
        .unwrap_or_else(|e| fallback_response(status_code, error, e))
    }
}

/// Runs one invocation. Never fails: every error becomes a 400 or 500 response.
pub fn handle(event: InboundEvent) -> OutboundResponse {
    process(event).unwrap_or_else(HandlerError::into_response)
}

/// Same as [`handle`], for a raw event payload that has not been decoded yet.
pub fn handle_value(payload: Value) -> OutboundResponse {
    decode_event(payload)
        .and_then(process)
        .unwrap_or_else(HandlerError::into_response)
}

pub fn decode_event(payload: Value) -> Result<InboundEvent, HandlerError> {
    if !payload.is_object() {
        return Err(HandlerError::EventNotObject(kind_of(&payload)));
    }
    Ok(InboundEvent::from_value(payload)?)
}

fn process(event: InboundEvent) -> Result<OutboundResponse, HandlerError> {
    let request = decode_body(event.body)?;
    if request.is_empty() {
        return Err(HandlerError::MessageRequired);
    }
    let response = OutboundResponse::json(
        200,
        &ResponseBody::Response {
            response: PLACEHOLDER_RESPONSE.to_string(),
        },
    )?;
    Ok(response.allow_any_origin())
}

fn decode_body(body: Option<Value>) -> Result<MessageRequest, HandlerError> {
    let raw = match body {
        None => return Ok(MessageRequest::default()),
        Some(Value::Null) => return Err(HandlerError::BodyNull),
        Some(Value::String(raw)) => raw,
        Some(other) => return Err(HandlerError::BodyNotString(kind_of(&other))),
    };
    match serde_json::from_str::<Value>(&raw)? {
        object @ Value::Object(_) => Ok(serde_json::from_value(object)?),
        other => Err(HandlerError::BodyNotObject(kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Only reached if serializing the error body itself fails.
fn fallback_response(status_code: u16, error: &str, cause: serde_json::Error) -> OutboundResponse {
    error!("Error: could not serialize response body: {}", cause);
    OutboundResponse {
        status_code,
        headers: [(
            super::event::CONTENT_TYPE.to_string(),
            super::event::APPLICATION_JSON.to_string(),
        )]
        .into_iter()
        .collect(),
        body: format!("{{\"error\": \"{error}\"}}"),
    }
}
