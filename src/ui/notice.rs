// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error notices

use std::fmt;

use tokio::sync::mpsc;

type CloseAction = Box<dyn FnOnce() + Send + 'static>;

/// User-visible error notice
///
/// The optional close action runs when the notice is dismissed. Dismissal
/// consumes the notice, so the action runs at most once.
pub struct Notice {
    message: String,
    on_close: Option<CloseAction>,
}

impl Notice {
    /// Plain notice without a close action
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            on_close: None,
        }
    }

    /// Notice that runs `on_close` once dismissed
    pub fn with_on_close<F>(message: impl Into<String>, on_close: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            message: message.into(),
            on_close: Some(Box::new(on_close)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_on_close(&self) -> bool {
        self.on_close.is_some()
    }

    /// Close the notice, running its close action
    pub fn dismiss(self) {
        if let Some(on_close) = self.on_close {
            on_close();
        }
    }
}

impl fmt::Debug for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notice")
            .field("message", &self.message)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Surface that shows error notices
pub trait Notifier: Send + Sync {
    /// Show an error notice; the implementation decides when it is dismissed
    fn error(&self, notice: Notice);
}

/// Logs notices and dismisses them immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, notice: Notice) {
        tracing::warn!(text = %notice.message(), "Notice");
        notice.dismiss();
    }
}

/// Forwards notices to a receiver, typically a UI event loop
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn error(&self, notice: Notice) {
        if let Err(mpsc::error::SendError(notice)) = self.sender.send(notice) {
            tracing::debug!(text = %notice.message(), "Notice receiver gone, dismissing");
            notice.dismiss();
        }
    }
}

/// Fixed notice texts for transport failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeText {
    /// Shown on a 401 status
    pub session_expired: String,
    /// Shown on a 404 status
    pub not_found: String,
    /// Shown when a failure carries no server message
    pub request_failed: String,
}

impl Default for NoticeText {
    fn default() -> Self {
        Self {
            session_expired: "登录过期，请重新登录".to_string(),
            not_found: "网络请求不存在".to_string(),
            request_failed: "请求出错".to_string(),
        }
    }
}

impl NoticeText {
    pub fn english() -> Self {
        Self {
            session_expired: "Session expired, please log in again".to_string(),
            not_found: "Requested resource not found".to_string(),
            request_failed: "Request failed".to_string(),
        }
    }
}
