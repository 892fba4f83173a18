//! Turning raw HTTP responses into payloads or classified errors.

use crate::error::{ApiError, KuberaError};
use rest_client::RawResponse;
use serde_json::Value;

/// Interpret a raw response.
pub fn interpret(response: &RawResponse) -> Result<Value, KuberaError> {
    interpret_parts(response.status, &response.body)
}

/// Interpret a status code and body text.
///
/// On 200 the body is parsed and the `data` field of the
/// `{"data": ..., "errorCode": 0}` envelope is returned; bodies without the
/// envelope are returned unchanged. Any other status becomes an [`ApiError`].
pub fn interpret_parts(status: u16, body: &str) -> Result<Value, KuberaError> {
    if status == 200 {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse response");
            KuberaError::Parse(e.to_string())
        })?;
        return Ok(unwrap_envelope(value));
    }

    let detail = error_detail(body);
    tracing::debug!(status = status, detail = %detail, "API error response");

    Err(ApiError::from_status(status, &detail).into())
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// The `message` field of a JSON object body, else the raw text.
fn error_detail(body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();

    match parsed.as_ref().and_then(|v| v.get("message")) {
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => body.to_string(),
    }
}
