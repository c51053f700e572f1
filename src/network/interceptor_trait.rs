// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interceptor trait and the built-in interceptors
//!
//! Interceptors run in priority order before every outgoing request and see
//! every raw response (or transport error) before it is settled.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{headers, RequestConfig, Response};
use crate::session::TokenStore;

/// Fixed value of the `timestamp` header sent with authenticated requests
pub const TIMESTAMP_HEADER_VALUE: &str = "10000";

/// Request interceptor trait
///
/// # Example
///
/// ```rust,no_run
/// use envelope_gateway::network::{RequestInterceptor, InterceptAction};
/// use envelope_gateway::http::RequestConfig;
/// use async_trait::async_trait;
///
/// struct TenantHeader {
///     tenant: String,
/// }
///
/// #[async_trait]
/// impl RequestInterceptor for TenantHeader {
///     async fn before_request(
///         &self,
///         req: &mut RequestConfig,
///     ) -> envelope_gateway::Result<InterceptAction> {
///         req.set_header("x-tenant", &self.tenant)?;
///         Ok(InterceptAction::Continue)
///     }
/// }
/// ```
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Called before a request is sent
    ///
    /// Can modify the request or abort it. An `Err` fails the call.
    async fn before_request(&self, _request: &mut RequestConfig) -> Result<InterceptAction> {
        Ok(InterceptAction::Continue)
    }

    /// Called after a response is received, whatever its status
    async fn after_response(&self, _response: &Response) {}

    /// Called when no response was received
    async fn on_error(&self, _url: &str, _error: &Error) {}

    /// Priority - higher priority interceptors run first
    fn priority(&self) -> i32 {
        0
    }
}

/// Action to take after interception
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) request
    Continue,
    /// Abort the request with a reason
    Abort(String),
}

/// Attaches the stored bearer token
///
/// Requests go out untouched when the store holds no token.
pub struct AuthHeaderInjector {
    store: Arc<dyn TokenStore>,
    timestamp: String,
}

impl AuthHeaderInjector {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            timestamp: TIMESTAMP_HEADER_VALUE.to_string(),
        }
    }

    /// Override the `timestamp` header value
    pub fn timestamp(mut self, value: impl Into<String>) -> Self {
        self.timestamp = value.into();
        self
    }
}

#[async_trait]
impl RequestInterceptor for AuthHeaderInjector {
    async fn before_request(&self, request: &mut RequestConfig) -> Result<InterceptAction> {
        if let Some(token) = self.store.get_token() {
            request.set_header(headers::TIMESTAMP, &self.timestamp)?;
            request.set_header(headers::AUTHORIZATION, &format!("Bearer {}", token))?;
        }
        Ok(InterceptAction::Continue)
    }

    fn priority(&self) -> i32 {
        100 // auth before logging
    }
}

/// Request logger interceptor
#[derive(Debug, Default)]
pub struct RequestLogger {
    /// Log url-encoded bodies
    pub log_bodies: bool,
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    async fn before_request(&self, request: &mut RequestConfig) -> Result<InterceptAction> {
        let header_names: Vec<&str> = request.headers.keys().map(|k| k.as_str()).collect();
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            response_type = %request.response_type,
            payload = request.payload.kind(),
            params = request.params.len(),
            headers = ?header_names,
            "Request"
        );

        if self.log_bodies {
            if let crate::http::Payload::Form(ref body) = request.payload {
                tracing::debug!(body = %body, "Request body");
            }
        }

        Ok(InterceptAction::Continue)
    }

    async fn after_response(&self, response: &Response) {
        tracing::debug!(
            url = %response.url,
            status = %response.status,
            time_ms = response.response_time_ms,
            bytes = response.body_len(),
            "Response"
        );
    }

    async fn on_error(&self, url: &str, error: &Error) {
        tracing::warn!(url, error = %error, "Request failed without response");
    }

    fn priority(&self) -> i32 {
        -100 // Low priority - run logging last
    }
}

/// Interceptor chain - manages multiple interceptors
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor
    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.add_shared(Arc::new(interceptor));
    }

    /// Add an already shared interceptor
    pub fn add_shared(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.push(interceptor);
        // stable sort keeps insertion order among equal priorities
        self.interceptors.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Process request through all interceptors
    pub async fn process_request(&self, request: &mut RequestConfig) -> Result<InterceptAction> {
        for interceptor in &self.interceptors {
            match interceptor.before_request(request).await? {
                InterceptAction::Continue => continue,
                action => return Ok(action),
            }
        }
        Ok(InterceptAction::Continue)
    }

    /// Process response through all interceptors
    pub async fn process_response(&self, response: &Response) {
        for interceptor in &self.interceptors {
            interceptor.after_response(response).await;
        }
    }

    /// Notify interceptors of an error
    pub async fn notify_error(&self, url: &str, error: &Error) {
        for interceptor in &self.interceptors {
            interceptor.on_error(url, error).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    struct Blocker;

    #[async_trait]
    impl RequestInterceptor for Blocker {
        async fn before_request(&self, _request: &mut RequestConfig) -> Result<InterceptAction> {
            Ok(InterceptAction::Abort("maintenance".to_string()))
        }
    }

    #[test]
    fn test_auth_injector_with_token() {
        let store = Arc::new(MemoryTokenStore::with_token("abc123"));
        let injector = AuthHeaderInjector::new(store);
        let mut request = RequestConfig::get("https://api.example.com/me");

        let action = tokio_test::block_on(injector.before_request(&mut request)).unwrap();

        assert_eq!(action, InterceptAction::Continue);
        assert_eq!(request.header_value("authorization"), Some("Bearer abc123"));
        assert_eq!(request.header_value("timestamp"), Some("10000"));
    }

    #[test]
    fn test_auth_injector_without_token() {
        let injector = AuthHeaderInjector::new(Arc::new(MemoryTokenStore::new()));
        let mut request = RequestConfig::get("https://api.example.com/me");

        tokio_test::block_on(injector.before_request(&mut request)).unwrap();

        assert!(request.headers.get("authorization").is_none());
        assert!(request.headers.get("timestamp").is_none());
    }

    #[test]
    fn test_auth_injector_rejects_bad_token() {
        let injector = AuthHeaderInjector::new(Arc::new(MemoryTokenStore::with_token("a\nb")));
        let mut request = RequestConfig::get("https://api.example.com/me");

        let err = tokio_test::block_on(injector.before_request(&mut request)).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { .. }));
    }

    #[test]
    fn test_chain_orders_by_priority() {
        let mut chain = InterceptorChain::new();
        chain.add(RequestLogger::default());
        chain.add(AuthHeaderInjector::new(Arc::new(MemoryTokenStore::new())));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.interceptors[0].priority(), 100);
        assert_eq!(chain.interceptors[1].priority(), -100);
    }

    #[test]
    fn test_chain_stops_on_abort() {
        let mut chain = InterceptorChain::new();
        chain.add(Blocker);
        chain.add(RequestLogger::default());
        let mut request = RequestConfig::get("https://api.example.com/me");

        let action = tokio_test::block_on(chain.process_request(&mut request)).unwrap();
        assert_eq!(action, InterceptAction::Abort("maintenance".to_string()));
    }
}
