//! The request/response binding itself.
//!
//! Flow Overview: read the `TurnstileSession` cookie, build the request's
//! [`Subject`], make one best-effort login attempt from the
//! `Authorization` header, dispatch, then reflect the subject's session
//! identifier back as a cookie.

use crate::auth::{Credentials, MemoryRealm, MemorySessionManager, Realm, SessionManager, Subject};
use axum::{
    extract::{Request, State},
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Cookie name fixed by the wire protocol; reading and writing must agree.
pub const SESSION_COOKIE_NAME: &str = "TurnstileSession";

const SESSION_COOKIE_MAX_AGE_SECONDS: u32 = 60 * 60 * 24 * 365;

/// Immutable collaborator handles shared by every request.
///
/// Cloning shares the underlying realm and session manager; no further
/// synchronization happens at this layer.
#[derive(Clone)]
pub struct AuthBinding {
    realm: Arc<dyn Realm>,
    sessions: Arc<dyn SessionManager>,
}

impl AuthBinding {
    #[must_use]
    pub fn new(realm: Arc<dyn Realm>, sessions: Arc<dyn SessionManager>) -> Self {
        Self { realm, sessions }
    }

    /// Binding backed by the in-memory collaborators. Explicit constructor
    /// rather than a process-wide default so tests can inject fakes per
    /// instance.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryRealm::new()),
            Arc::new(MemorySessionManager::new()),
        )
    }

    /// Build the subject for one request from its session cookie value.
    pub async fn subject(&self, session_id: Option<String>) -> Subject {
        Subject::restore(self.realm.clone(), self.sessions.clone(), session_id).await
    }
}

impl Default for AuthBinding {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Middleware function for `axum::middleware::from_fn_with_state`.
///
/// Every request reaches its handler carrying a [`Subject`] extension;
/// every response reflects the resulting session state as a cookie.
/// Handler errors and responses pass through unmodified.
pub async fn bind_subject(
    State(binding): State<AuthBinding>,
    mut request: Request,
    next: Next,
) -> Response {
    let session_id = session_cookie_value(request.headers());
    let subject = binding.subject(session_id).await;

    if let Some(credentials) = Credentials::from_headers(request.headers()) {
        // Best-effort: a rejected login is discarded and the subject stays
        // anonymous. Handlers cannot tell "no credentials" from "bad
        // credentials" at this layer.
        if let Err(err) = subject.login(&credentials, false).await {
            debug!("header login rejected: {err}");
        }
    }

    request.extensions_mut().insert(subject.clone());

    let mut response = next.run(request).await;

    if let Some(session_id) = subject.session_id() {
        match session_cookie(&session_id) {
            Ok(cookie) => {
                response.headers_mut().append(SET_COOKIE, cookie);
            }
            Err(err) => debug!("session id not representable as cookie: {err}"),
        }
    }

    response
}

/// Find the session cookie among the request's `Cookie` header pairs.
fn session_cookie_value(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
            // Valueless pair; keep scanning.
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(val.trim().to_string());
        }
    }
    None
}

/// Build the `HttpOnly` session cookie carrying the session identifier.
fn session_cookie(session_id: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={session_id}; Path=/; HttpOnly; Max-Age={SESSION_COOKIE_MAX_AGE_SECONDS}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_has_fixed_attributes() {
        let cookie = session_cookie("01ARZ3NDEKTSV4RRFFQ69G5FAV").expect("cookie");
        assert_eq!(
            cookie.to_str().ok(),
            Some("TurnstileSession=01ARZ3NDEKTSV4RRFFQ69G5FAV; Path=/; HttpOnly; Max-Age=31536000")
        );
    }

    #[test]
    fn session_cookie_rejects_unrepresentable_value() {
        assert!(session_cookie("bad\nvalue").is_err());
    }

    #[test]
    fn cookie_value_found_among_other_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; TurnstileSession=abc123; lang=en"),
        );
        assert_eq!(session_cookie_value(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn cookie_value_tolerates_spacing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("  TurnstileSession = abc123 "),
        );
        assert_eq!(session_cookie_value(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn cookie_value_none_when_absent() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_cookie_value(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_cookie_value(&headers), None);
    }

    #[test]
    fn cookie_value_skips_valueless_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("flag; TurnstileSession=abc123"),
        );
        assert_eq!(session_cookie_value(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn cookie_name_is_exact_match() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("turnstilesession=abc; XTurnstileSession=def"),
        );
        assert_eq!(session_cookie_value(&headers), None);
    }
}
