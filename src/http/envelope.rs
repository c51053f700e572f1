// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Business code for success
pub const CODE_OK: i64 = 200;
/// Business code for an expired or missing session
pub const CODE_UNAUTHORIZED: i64 = 401;

/// `{code, message, data}` wrapper around every non-blob response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Business status code
    pub code: i64,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Payload
    #[serde(default)]
    pub data: Value,
}

impl ResponseEnvelope {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == CODE_UNAUTHORIZED
    }

    /// Deserialize `data` into a concrete type
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.data.clone())
    }
}

/// Extract `message` from a failure body, if it carries one
///
/// Failure bodies are not guaranteed to be envelopes, so anything that is
/// not a JSON object with a non-empty string `message` yields `None`.
pub fn failure_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_envelope() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"code":200,"message":"ok","data":{"id":7}}"#).unwrap();

        assert!(envelope.is_ok());
        assert_eq!(envelope.data, json!({"id": 7}));
        assert_eq!(envelope.data_as::<serde_json::Map<String, Value>>().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_fields_default() {
        let envelope: ResponseEnvelope = serde_json::from_str(r#"{"code":401}"#).unwrap();

        assert!(envelope.is_unauthorized());
        assert_eq!(envelope.message, "");
        assert_eq!(envelope.data, Value::Null);
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failure_message(br#"{"code":404,"message":"gone"}"#),
            Some("gone".to_string())
        );
        assert_eq!(failure_message(br#"{"message":""}"#), None);
        assert_eq!(failure_message(b"<html>Bad Gateway</html>"), None);
        assert_eq!(failure_message(br#"{"error":"x"}"#), None);
    }
}
