// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request gateway

use std::sync::Arc;

use reqwest::multipart::Form;
use serde::Serialize;

use super::config::{url_to_https, GatewayConfig};
use super::settle::{Reply, ResponseHandler, Settlement};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig, ResponseType};
use crate::network::{
    AuthHeaderInjector, InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger,
};
use crate::session::{MemoryTokenStore, TokenStore};
use crate::ui::{LogNotifier, MemoryRouter, Navigator, Notifier};

/// Shared, cheaply cloneable request gateway
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use envelope_gateway::{RequestGateway, MemoryTokenStore};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> envelope_gateway::Result<()> {
///     let gateway = RequestGateway::builder()
///         .token_store(Arc::new(MemoryTokenStore::with_token("eyJhbGciOi")))
///         .build()?;
///
///     let reply = gateway.get("https://api.example.com/orders", &json!({"page": 1})).await?;
///     if let Some(envelope) = reply.envelope() {
///         println!("{}", envelope.data);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RequestGateway {
    inner: Arc<Inner>,
}

struct Inner {
    client: HttpClient,
    config: GatewayConfig,
    interceptors: InterceptorChain,
    handler: ResponseHandler,
}

impl RequestGateway {
    /// Gateway with default configuration and collaborators
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// GET with `params` as the query string
    pub async fn get<P: Serialize + ?Sized>(&self, url: &str, params: &P) -> Result<Reply> {
        self.get_as(url, params, ResponseType::Json).await
    }

    pub async fn get_as<P: Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
        response_type: ResponseType,
    ) -> Result<Reply> {
        let request = RequestConfig::get(url)
            .query(params)?
            .response_type(response_type);
        self.send(request).await
    }

    /// POST with a JSON body
    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Reply> {
        self.post_as(url, body, ResponseType::Json).await
    }

    pub async fn post_as<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        response_type: ResponseType,
    ) -> Result<Reply> {
        let request = RequestConfig::post(url)
            .json(body)?
            .response_type(response_type);
        self.send(request).await
    }

    /// POST with an url-encoded form body
    pub async fn x_form<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Reply> {
        self.x_form_as(url, body, ResponseType::Json).await
    }

    pub async fn x_form_as<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        response_type: ResponseType,
    ) -> Result<Reply> {
        let request = RequestConfig::post(url)
            .form(body)?
            .response_type(response_type);
        self.send(request).await
    }

    /// POST with a caller-built multipart body
    pub async fn form_data(&self, url: &str, form: Form) -> Result<Reply> {
        self.form_data_as(url, form, ResponseType::Json).await
    }

    pub async fn form_data_as(
        &self,
        url: &str,
        form: Form,
        response_type: ResponseType,
    ) -> Result<Reply> {
        let request = RequestConfig::post(url)
            .multipart(form)
            .response_type(response_type);
        self.send(request).await
    }

    /// Dispatch a request through the interceptors
    ///
    /// Never completes when the server reports an expired session in the
    /// envelope and the gateway is configured to hold.
    pub async fn send(&self, mut request: RequestConfig) -> Result<Reply> {
        let inner = &self.inner;
        request.url = url_to_https(&request.url, &inner.config.environment);

        let action = inner.interceptors.process_request(&mut request).await?;
        if let InterceptAction::Abort(reason) = action {
            tracing::debug!(url = %request.url, reason = %reason, "Request aborted");
            return Err(Error::Aborted(reason));
        }

        let url = request.url.clone();
        let outcome = inner.client.execute(request).await;
        match outcome {
            Ok(ref response) => inner.interceptors.process_response(response).await,
            Err(ref e) => inner.interceptors.notify_error(&url, e).await,
        }

        match inner.handler.settle(outcome) {
            Settlement::Resolve(reply) => Ok(reply),
            Settlement::Reject(e) => Err(e),
            Settlement::Hold => std::future::pending().await,
        }
    }
}

/// Builder wiring configuration and collaborators
pub struct GatewayBuilder {
    config: GatewayConfig,
    tokens: Option<Arc<dyn TokenStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self {
            config: GatewayConfig::default(),
            tokens: None,
            notifier: None,
            navigator: None,
            interceptors: Vec::new(),
        }
    }

    /// Set configuration
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Set token store (default: empty in-memory store)
    pub fn token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set notifier (default: log and dismiss)
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set navigator (default: in-memory router)
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Add a request interceptor next to the built-in ones
    pub fn interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> Result<RequestGateway> {
        let client = HttpClient::with_config(self.config.http.clone())?;
        let tokens = self
            .tokens
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()) as Arc<dyn TokenStore>);
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(LogNotifier) as Arc<dyn Notifier>);
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(MemoryRouter::new()) as Arc<dyn Navigator>);

        let mut interceptors = InterceptorChain::new();
        interceptors.add(
            AuthHeaderInjector::new(tokens.clone()).timestamp(self.config.timestamp.clone()),
        );
        interceptors.add(RequestLogger::default());
        for interceptor in self.interceptors {
            interceptors.add_shared(interceptor);
        }

        let handler = ResponseHandler::new(
            notifier,
            tokens,
            navigator,
            self.config.notices.clone(),
            self.config.session_expiry,
        );

        tracing::debug!(
            timeout_ms = self.config.http.timeout.as_millis() as u64,
            production = self.config.environment.is_production(),
            interceptors = interceptors.len(),
            "Gateway ready"
        );

        Ok(RequestGateway {
            inner: Arc::new(Inner {
                client,
                config: self.config,
                interceptors,
                handler,
            }),
        })
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
