// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for the gateway
//!
//! Wraps reqwest with a fixed client configuration, a transient request
//! description, raw responses and the `{code, message, data}` envelope.

mod client;
mod envelope;
mod form;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use envelope::{failure_message, ResponseEnvelope};
pub use form::{flatten_pairs, query_pairs, to_form_string};
pub use request::{Payload, RequestConfig, ResponseType};
pub use response::Response;

/// Default client-wide timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Common HTTP headers and content types
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const AUTHORIZATION: &str = "authorization";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const TIMESTAMP: &str = "timestamp";

    pub const JSON_UTF8: &str = "application/json;charset=UTF-8";
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
}
