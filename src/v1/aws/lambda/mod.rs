use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::info_span;

use crate::v1::event::OutboundResponse;
use crate::v1::handler::handle_value;

/// Lambda entry point.
///
/// The payload is taken as a raw [`Value`] so an event the handler can't read
/// still gets the structured 500 response instead of a runtime-level
/// deserialization failure.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<OutboundResponse, Error> {
    let span = info_span!("invocation", request_id = %event.context.request_id);
    let _guard = span.enter();
    Ok(handle_value(event.payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::test_support::CapturedLogs;
    use lambda_runtime::Context;
    use serde_json::json;

    async fn invoke(payload: Value) -> OutboundResponse {
        function_handler(LambdaEvent::new(payload, Context::default()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn api_gateway_event_gets_placeholder() {
        let response = invoke(json!({
            "httpMethod": "POST",
            "path": "/chat",
            "body": "{\"message\": \"What is Rust?\"}",
            "isBase64Encoded": false
        }))
        .await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, r#"{"response": "Hello world"}"#);
    }

    #[tokio::test]
    async fn event_without_body_is_bad_request() {
        let response = invoke(json!({"httpMethod": "GET"})).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error": "Message is required"}"#);
    }

    #[tokio::test]
    async fn null_body_is_internal_error() {
        let response = invoke(json!({"httpMethod": "GET", "body": null})).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, r#"{"error": "Internal server error"}"#);
    }

    #[tokio::test]
    async fn request_id_is_recorded_on_log_lines() {
        let mut context = Context::default();
        context.request_id = "req-7f3a".to_string();
        let logs = CapturedLogs::default();
        let response = {
            let _guard = logs.install();
            function_handler(LambdaEvent::new(json!({"body": "not-json"}), context))
                .await
                .unwrap()
        };
        assert_eq!(response.status_code, 500);
        let text = logs.text();
        assert!(text.contains("invocation{request_id=req-7f3a}"), "{text}");
        assert!(text.contains("Invalid JSON body"), "{text}");
    }

    #[tokio::test]
    async fn unreadable_event_is_still_a_response() {
        for payload in [json!("raw string"), json!({"body": 12})] {
            let response = invoke(payload).await;
            assert_eq!(response.status_code, 500);
            assert_eq!(response.body, r#"{"error": "Internal server error"}"#);
        }
    }

    #[tokio::test]
    async fn response_uses_proxy_integration_shape() {
        let response = invoke(json!({"body": "{\"message\":\"x\"}"})).await;
        let value = serde_json::to_value(&response).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(value.get("statusCode").is_some());
        assert!(value.get("headers").is_some());
        assert!(value.get("body").is_some());
    }
}
