// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Envelope Gateway - HTTP request gateway for envelope APIs
//!
//! A thin layer over reqwest for backends that wrap every response in a
//! `{code, message, data}` envelope.
//!
//! ## Features
//!
//! - Fixed client defaults: 10 s timeout, JSON bodies, JSON responses
//! - Bearer token injection from a pluggable token store
//! - Envelope normalization with blob pass-through
//! - Session expiry flow: notice, token removal, redirect to `/`
//! - HTTPS upgrade of request URLs in production builds served over HTTPS
//! - `get`, `post`, `x_form` and `form_data` helpers
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use envelope_gateway::{GatewayConfig, MemoryTokenStore, RequestGateway};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = RequestGateway::builder()
//!         .config(GatewayConfig::from_env()?)
//!         .token_store(Arc::new(MemoryTokenStore::with_token("eyJhbGciOi")))
//!         .build()?;
//!
//!     let reply = gateway
//!         .x_form("http://api.example.com/login", &json!({"user": "li", "pwd": "secret"}))
//!         .await?;
//!     println!("{:?}", reply.envelope());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod gateway;
pub mod http;
pub mod network;
pub mod session;
pub mod ui;

// Re-exports for convenience

// Gateway
pub use gateway::{
    url_to_https, BuildMode, Environment, GatewayBuilder, GatewayConfig, Reply, RequestGateway,
    SessionExpiryMode,
};

// Errors
pub use error::{Error, FailureKind, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, RequestConfig, Response, ResponseEnvelope, ResponseType};

// Network
pub use network::{AuthHeaderInjector, InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger};

// Session
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};

// UI
pub use ui::{ChannelNotifier, LogNotifier, MemoryRouter, Navigator, Notice, NoticeText, Notifier};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
