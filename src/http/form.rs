// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Key/value flattening for query strings and url-encoded bodies
//!
//! Form bodies use bracket notation: `{"a": {"b": 1}}` becomes `a[b]=1`
//! and `{"a": ["x", "y"]}` becomes `a[0]=x&a[1]=y`. Nulls encode as empty
//! values, empty arrays and objects are skipped.
//!
//! Query strings are flatter: null keys are dropped, arrays repeat the key
//! as `a[]=x&a[]=y` and nested objects are sent as JSON text.

use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::{Error, Result};

/// Flatten a serializable mapping into ordered form pairs
pub fn flatten_pairs<T: Serialize + ?Sized>(data: &T) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (key, value) in top_level(data)? {
        push_value(&mut pairs, key, value);
    }
    Ok(pairs)
}

/// Flatten a serializable mapping into ordered query parameters
pub fn query_pairs<T: Serialize + ?Sized>(data: &T) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (key, value) in top_level(data)? {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let key = format!("{}[]", key);
                for item in items {
                    pairs.push((key.clone(), query_scalar(item)));
                }
            }
            other => pairs.push((key, query_scalar(other))),
        }
    }
    Ok(pairs)
}

/// Encode a serializable mapping as `application/x-www-form-urlencoded`
pub fn to_form_string<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let pairs = flatten_pairs(data)?;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    Ok(serializer.finish())
}

fn top_level<T: Serialize + ?Sized>(data: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(data)? {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        other => Err(Error::form(format!(
            "expected a key/value mapping, got {}",
            type_name(&other)
        ))),
    }
}

fn query_scalar(value: Value) -> String {
    match value {
        Value::String(s) => s,
        // Objects and nested arrays go out as JSON text
        other => other.to_string(),
    }
}

fn push_value(pairs: &mut Vec<(String, String)>, key: String, value: Value) {
    match value {
        Value::Null => pairs.push((key, String::new())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s)),
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                push_value(pairs, format!("{}[{}]", key, index), item);
            }
        }
        Value::Object(map) => {
            for (child, item) in map {
                push_value(pairs, format!("{}[{}]", key, child), item);
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
