// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the request gateway
//!
//! Transport failures keep the server-provided message callers used to see,
//! alongside the failure kind, the status and the raw response.

use std::fmt;

use thiserror::Error;

use crate::http::Response;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a rejected transport response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 401: not logged in or token expired
    Unauthorized,
    /// 404: requested resource does not exist
    NotFound,
    /// Any other non-success status
    Server,
}

impl FailureKind {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => FailureKind::Unauthorized,
            404 => FailureKind::NotFound,
            _ => FailureKind::Server,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::Server => write!(f, "server error"),
        }
    }
}

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum Error {
    /// Client construction or request building failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No response was received (connect failure, timeout)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response body is not a valid envelope
    #[error("Invalid response envelope from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Form payload is not key/value shaped
    #[error("Form encoding error: {0}")]
    Form(String),

    /// Header name or value rejected
    #[error("Invalid header '{name}'")]
    InvalidHeader { name: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An interceptor refused to send the request
    #[error("Request aborted: {0}")]
    Aborted(String),

    /// 2xx response other than 200
    #[error("{}", unexpected_display(.0))]
    UnexpectedStatus(Box<Response>),

    /// Envelope reported an expired session (code 401)
    #[error("{message}")]
    SessionExpired { message: String },

    /// Server answered with a failure status
    #[error("{}", rejected_display(.kind, .status, .message))]
    Rejected {
        kind: FailureKind,
        status: u16,
        message: Option<String>,
        response: Box<Response>,
    },
}

fn unexpected_display(response: &Response) -> String {
    format!("Unexpected status {} from {}", response.status, response.url)
}

fn rejected_display(kind: &FailureKind, status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status {} ({})", status, kind),
    }
}

impl Error {
    /// Create a rejection from a failed response
    pub fn rejected(response: Response, message: Option<String>) -> Self {
        let status = response.status_code();
        Error::Rejected {
            kind: FailureKind::from_status(status),
            status,
            message,
            response: Box::new(response),
        }
    }

    /// Create a form encoding error
    pub fn form<S: Into<String>>(msg: S) -> Self {
        Error::Form(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Server-provided message of a rejected response
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Rejected { message, .. } => message.as_deref(),
            Error::SessionExpired { message } => Some(message),
            _ => None,
        }
    }

    /// Failure kind of a rejected response
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Error::Rejected { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Rejected { status, .. } => Some(*status),
            Error::UnexpectedStatus(response) => Some(response.status_code()),
            Error::Network(e) | Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response behind the error, if one was received
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Rejected { response, .. } => Some(response),
            Error::UnexpectedStatus(response) => Some(response),
            _ => None,
        }
    }

    /// Check if this is an authentication failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::SessionExpired { .. })
            || self.kind() == Some(FailureKind::Unauthorized)
    }

    /// Check if this is a not-found failure
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(FailureKind::NotFound)
    }

    /// Check if no response was received
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Network(e) | Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
