// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request description handed through the interceptors

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::Serialize;

use super::form::{query_pairs, to_form_string};
use super::headers;
use crate::error::{Error, Result};

/// How the response body should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Decode the `{code, message, data}` envelope
    #[default]
    Json,
    /// Pass raw bytes through
    Blob,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Json => "json",
            ResponseType::Blob => "blob",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ResponseType::Json),
            "blob" => Ok(ResponseType::Blob),
            other => Err(Error::config(format!("unknown response type '{}'", other))),
        }
    }
}

/// Encoded request body
pub enum Payload {
    /// No body
    Empty,
    /// JSON-encoded body
    Json(Bytes),
    /// `application/x-www-form-urlencoded` body
    Form(String),
    /// Caller-built multipart form
    Multipart(Form),
}

impl Payload {
    /// Body kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Json(_) => "json",
            Payload::Form(_) => "form",
            Payload::Multipart(_) => "multipart",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Empty => write!(f, "Empty"),
            Payload::Json(body) => write!(f, "Json({} bytes)", body.len()),
            Payload::Form(body) => write!(f, "Form({:?})", body),
            Payload::Multipart(form) => write!(f, "Multipart(boundary={})", form.boundary()),
        }
    }
}

/// Per-call request configuration
///
/// Built by the gateway operations, adjusted by request interceptors and
/// consumed on dispatch.
#[derive(Debug)]
pub struct RequestConfig {
    /// Request method
    pub method: Method,
    /// Request URL, possibly relative to the configured base URL
    pub url: String,
    /// Query parameters, in insertion order
    pub params: Vec<(String, String)>,
    /// Request body
    pub payload: Payload,
    /// Request headers
    pub headers: HeaderMap,
    /// Response handling
    pub response_type: ResponseType,
}

impl RequestConfig {
    /// Create a request with arbitrary method
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            payload: Payload::Empty,
            headers: HeaderMap::new(),
            response_type: ResponseType::default(),
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Set a header, rejecting invalid names or values
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        self.set_header(name.as_ref(), value.as_ref())?;
        Ok(self)
    }

    /// Insert a header in place
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let invalid = || Error::InvalidHeader {
            name: name.to_string(),
        };
        let name_value = HeaderName::try_from(name).map_err(|_| invalid())?;
        let header_value = HeaderValue::try_from(value).map_err(|_| invalid())?;
        self.headers.insert(name_value, header_value);
        Ok(())
    }

    /// Set query parameters from any serializable value
    ///
    /// Null values are left out; arrays repeat the key as `key[]`.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self> {
        self.params = query_pairs(params)?;
        Ok(self)
    }

    /// Set JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.payload = Payload::Json(Bytes::from(json));
        self.header(headers::CONTENT_TYPE, headers::JSON_UTF8)
    }

    /// Set form body
    pub fn form<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self> {
        self.payload = Payload::Form(to_form_string(data)?);
        self.header(headers::CONTENT_TYPE, headers::FORM_URLENCODED)
    }

    /// Set multipart body
    ///
    /// reqwest completes the content type with the form boundary on send.
    pub fn multipart(mut self, form: Form) -> Self {
        self.payload = Payload::Multipart(form);
        self
    }

    /// Set response type
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Get a header value
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
