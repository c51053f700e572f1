// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use url::Url;

use super::request::{Payload, RequestConfig};
use super::response::Response;
use super::{headers, DEFAULT_TIMEOUT_SECS};
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Client-wide timeout
    pub timeout: Duration,
    /// Headers sent with every request
    pub default_headers: HeaderMap,
    /// Base URL relative request URLs are resolved against
    pub base_url: Option<Url>,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            headers::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers,
            base_url: None,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set base URL
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(base_url.as_ref())?);
        Ok(self)
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Thin wrapper around a configured reqwest client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Resolve a request URL against the base URL
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        match Url::parse(url) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match self.config.base_url {
                Some(ref base) => Ok(base.join(url)?),
                None => Err(url::ParseError::RelativeUrlWithoutBase.into()),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Execute a request
    ///
    /// Any status is returned as a `Response`; only a missing response is an error.
    pub async fn execute(&self, request: RequestConfig) -> Result<Response> {
        let start = Instant::now();
        let url = self.resolve_url(&request.url)?;

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.body(body),
            Payload::Form(body) => builder.body(body),
            Payload::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(Error::Network)?;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::Network)?;
        let response_time = start.elapsed().as_millis() as u64;

        Ok(Response::new(
            status,
            headers,
            body,
            final_url,
            request.response_type,
            response_time,
        ))
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}
