// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response settlement
//!
//! Turns a transport outcome into what the caller observes, raising notices
//! and driving the logout flow on the way.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::StatusCode;

use super::config::SessionExpiryMode;
use crate::error::{Error, FailureKind, Result};
use crate::http::{Response, ResponseEnvelope};
use crate::session::TokenStore;
use crate::ui::{Navigator, Notice, NoticeText, Notifier, ROOT_ROUTE};

/// Value a successful call resolves with
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Envelope with code 200
    Envelope(ResponseEnvelope),
    /// Raw body of a blob request
    Blob(Bytes),
    /// Business failure, already reported through a notice
    Null,
}

impl Reply {
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            Reply::Envelope(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub fn into_envelope(self) -> Option<ResponseEnvelope> {
        match self {
            Reply::Envelope(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub fn blob(&self) -> Option<&Bytes> {
        match self {
            Reply::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Reply::Null)
    }
}

/// Outcome of the response interceptor
#[derive(Debug)]
pub enum Settlement {
    Resolve(Reply),
    Reject(Error),
    /// The call never completes
    Hold,
}

/// Response interceptor
pub struct ResponseHandler {
    notifier: Arc<dyn Notifier>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    notices: NoticeText,
    session_expiry: SessionExpiryMode,
}

impl ResponseHandler {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        notices: NoticeText,
        session_expiry: SessionExpiryMode,
    ) -> Self {
        Self {
            notifier,
            tokens,
            navigator,
            notices,
            session_expiry,
        }
    }

    /// Settle a transport outcome
    pub fn settle(&self, outcome: Result<Response>) -> Settlement {
        match outcome {
            Ok(response) if response.status == StatusCode::OK => self.on_ok(response),
            Ok(response) if response.is_success() => {
                tracing::debug!(status = %response.status, url = %response.url, "Unexpected success status");
                Settlement::Reject(Error::UnexpectedStatus(Box::new(response)))
            }
            Ok(response) => self.on_failure(response),
            Err(Error::Network(e)) => {
                self.notifier.error(Notice::new(self.notices.request_failed.clone()));
                Settlement::Reject(Error::Network(e))
            }
            Err(e) => Settlement::Reject(e),
        }
    }

    fn on_ok(&self, response: Response) -> Settlement {
        if response.is_blob() {
            return Settlement::Resolve(Reply::Blob(response.body));
        }

        let envelope: ResponseEnvelope = match response.json() {
            Ok(envelope) => envelope,
            Err(e) => return Settlement::Reject(e),
        };

        if envelope.is_ok() {
            return Settlement::Resolve(Reply::Envelope(envelope));
        }

        if envelope.is_unauthorized() {
            tracing::info!(url = %response.url, "Session expired");
            self.notifier.error(self.logout_notice(envelope.message.clone()));
            return match self.session_expiry {
                SessionExpiryMode::Hold => Settlement::Hold,
                SessionExpiryMode::Reject => Settlement::Reject(Error::SessionExpired {
                    message: envelope.message,
                }),
            };
        }

        tracing::debug!(code = envelope.code, url = %response.url, "Business failure");
        self.notifier.error(Notice::new(envelope.message));
        Settlement::Resolve(Reply::Null)
    }

    fn on_failure(&self, response: Response) -> Settlement {
        let message = response.server_message();

        match FailureKind::from_status(response.status_code()) {
            FailureKind::Unauthorized => {
                self.notifier
                    .error(self.logout_notice(self.notices.session_expired.clone()));
            }
            FailureKind::NotFound => {
                self.notifier.error(Notice::new(self.notices.not_found.clone()));
            }
            FailureKind::Server => {
                let text = message
                    .clone()
                    .unwrap_or_else(|| self.notices.request_failed.clone());
                self.notifier.error(Notice::new(text));
            }
        }

        Settlement::Reject(Error::rejected(response, message))
    }

    /// Notice whose dismissal logs the user out
    fn logout_notice(&self, message: String) -> Notice {
        let tokens = self.tokens.clone();
        let navigator = self.navigator.clone();
        Notice::with_on_close(message, move || {
            tokens.remove_token();
            navigator.push(ROOT_ROUTE);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use reqwest::header::HeaderMap;
    use url::Url;

    use crate::http::ResponseType;
    use crate::session::MemoryTokenStore;
    use crate::ui::MemoryRouter;

    #[derive(Default)]
    struct HeldNotices(Mutex<Vec<Notice>>);

    impl Notifier for HeldNotices {
        fn error(&self, notice: Notice) {
            self.0.lock().push(notice);
        }
    }

    struct Fixture {
        notices: Arc<HeldNotices>,
        tokens: Arc<MemoryTokenStore>,
        router: Arc<MemoryRouter>,
        handler: ResponseHandler,
    }

    fn fixture(mode: SessionExpiryMode) -> Fixture {
        let notices = Arc::new(HeldNotices::default());
        let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
        let router = Arc::new(MemoryRouter::starting_at("/orders"));
        let handler = ResponseHandler::new(
            notices.clone(),
            tokens.clone(),
            router.clone(),
            NoticeText::english(),
            mode,
        );
        Fixture {
            notices,
            tokens,
            router,
            handler,
        }
    }

    fn response(status: u16, body: &str, response_type: ResponseType) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Bytes::from(body.to_string()),
            Url::parse("https://api.example.com/orders").unwrap(),
            response_type,
            5,
        )
    }

    fn messages(f: &Fixture) -> Vec<String> {
        f.notices.0.lock().iter().map(|n| n.message().to_string()).collect()
    }

    #[test]
    fn test_envelope_ok_resolves_full_envelope() {
        let f = fixture(SessionExpiryMode::Hold);
        let body = r#"{"code":200,"message":"ok","data":{"id":1}}"#;

        match f.handler.settle(Ok(response(200, body, ResponseType::Json))) {
            Settlement::Resolve(Reply::Envelope(envelope)) => {
                assert_eq!(envelope.message, "ok");
                assert_eq!(envelope.data["id"], 1);
            }
            other => panic!("Expected envelope, got {:?}", other),
        }
        assert!(messages(&f).is_empty());
    }

    #[test]
    fn test_blob_bypasses_envelope() {
        let f = fixture(SessionExpiryMode::Hold);
        let body = r#"{"code":500,"message":"looks like an error"}"#;

        match f.handler.settle(Ok(response(200, body, ResponseType::Blob))) {
            Settlement::Resolve(Reply::Blob(bytes)) => assert_eq!(&bytes[..], body.as_bytes()),
            other => panic!("Expected blob, got {:?}", other),
        }
        assert!(messages(&f).is_empty());
    }

    #[test]
    fn test_business_failure_resolves_null() {
        let f = fixture(SessionExpiryMode::Hold);
        let body = r#"{"code":500,"message":"Y"}"#;

        let settlement = f.handler.settle(Ok(response(200, body, ResponseType::Json)));
        assert!(matches!(settlement, Settlement::Resolve(Reply::Null)));
        assert_eq!(messages(&f), vec!["Y".to_string()]);
    }

    #[test]
    fn test_envelope_unauthorized_holds_until_dismissed() {
        let f = fixture(SessionExpiryMode::Hold);
        let body = r#"{"code":401,"message":"X"}"#;

        let settlement = f.handler.settle(Ok(response(200, body, ResponseType::Json)));
        assert!(matches!(settlement, Settlement::Hold));
        assert_eq!(messages(&f), vec!["X".to_string()]);

        // nothing happens before dismissal
        assert_eq!(f.tokens.get_token().as_deref(), Some("tok"));
        assert_eq!(f.router.current().as_deref(), Some("/orders"));

        let notice = f.notices.0.lock().pop().unwrap();
        notice.dismiss();
        assert!(f.tokens.get_token().is_none());
        assert_eq!(f.router.current().as_deref(), Some("/"));
    }

    #[test]
    fn test_envelope_unauthorized_reject_mode() {
        let f = fixture(SessionExpiryMode::Reject);
        let body = r#"{"code":401,"message":"X"}"#;

        match f.handler.settle(Ok(response(200, body, ResponseType::Json))) {
            Settlement::Reject(err) => {
                assert!(err.is_unauthorized());
                assert_eq!(err.message(), Some("X"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_envelope_rejects() {
        let f = fixture(SessionExpiryMode::Hold);
        let settlement = f.handler.settle(Ok(response(200, "<html/>", ResponseType::Json)));
        assert!(matches!(settlement, Settlement::Reject(Error::Decode { .. })));
    }

    #[test]
    fn test_other_success_status_rejects_with_response() {
        let f = fixture(SessionExpiryMode::Hold);
        match f.handler.settle(Ok(response(201, "{}", ResponseType::Json))) {
            Settlement::Reject(Error::UnexpectedStatus(resp)) => assert_eq!(resp.status_code(), 201),
            other => panic!("Expected unexpected status, got {:?}", other),
        }
        assert!(messages(&f).is_empty());
    }

    #[test]
    fn test_transport_unauthorized() {
        let f = fixture(SessionExpiryMode::Hold);
        let body = r#"{"code":401,"message":"token expired"}"#;

        match f.handler.settle(Ok(response(401, body, ResponseType::Json))) {
            Settlement::Reject(err) => {
                assert!(err.is_unauthorized());
                assert_eq!(err.message(), Some("token expired"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert_eq!(messages(&f), vec![NoticeText::english().session_expired]);

        f.notices.0.lock().pop().unwrap().dismiss();
        assert!(f.tokens.get_token().is_none());
        assert_eq!(f.router.current().as_deref(), Some("/"));
    }

    #[test]
    fn test_transport_not_found() {
        let f = fixture(SessionExpiryMode::Hold);
        let body = r#"{"message":"no route"}"#;

        match f.handler.settle(Ok(response(404, body, ResponseType::Json))) {
            Settlement::Reject(err) => {
                assert!(err.is_not_found());
                assert_eq!(err.message(), Some("no route"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert_eq!(messages(&f), vec![NoticeText::english().not_found]);
        assert!(!f.notices.0.lock()[0].has_on_close());
    }

    #[test]
    fn test_transport_server_error_message_or_fallback() {
        let f = fixture(SessionExpiryMode::Hold);

        f.handler
            .settle(Ok(response(500, r#"{"message":"db down"}"#, ResponseType::Json)));
        f.handler
            .settle(Ok(response(502, "Bad Gateway", ResponseType::Json)));

        assert_eq!(
            messages(&f),
            vec!["db down".to_string(), NoticeText::english().request_failed]
        );
    }

    #[test]
    fn test_pre_dispatch_errors_pass_through_silently() {
        let f = fixture(SessionExpiryMode::Hold);
        let settlement = f
            .handler
            .settle(Err(url::ParseError::RelativeUrlWithoutBase.into()));

        assert!(matches!(settlement, Settlement::Reject(Error::Url(_))));
        assert!(messages(&f).is_empty());
    }
}
