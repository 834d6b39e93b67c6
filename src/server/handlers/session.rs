//! Session endpoints driving the subject attached by the middleware.
//!
//! The login route is where persisted sessions are born: it logs the
//! request's subject in with `persist`, and the middleware turns the
//! resulting session identifier into the response cookie.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{Credentials, Subject};

#[derive(Deserialize)]
pub struct LoginRequest {
    id: String,
    secret: String,
}

#[derive(Serialize, Debug)]
pub struct WhoamiResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
}

/// Log in with an id/secret pair and persist a session.
///
/// Failures are reported as a bare 401; which part of the pair was wrong
/// is deliberately not disclosed.
pub async fn login(
    Extension(subject): Extension<Subject>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload").into_response();
    };

    let credentials = Credentials::Basic {
        id: request.id,
        secret: request.secret,
    };

    match subject.login(&credentials, true).await {
        Ok(()) => Json(WhoamiResponse {
            authenticated: true,
            account_id: subject.account_id(),
            session_id: subject.session_id(),
        })
        .into_response(),
        Err(err) => {
            debug!("login rejected: {err}");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

/// Drop the subject's session. Always succeeds, even when anonymous.
pub async fn logout(Extension(subject): Extension<Subject>) -> StatusCode {
    subject.logout().await;
    StatusCode::NO_CONTENT
}

/// Report the authentication state the middleware resolved.
pub async fn whoami(Extension(subject): Extension<Subject>) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        authenticated: subject.authenticated(),
        account_id: subject.account_id(),
        session_id: subject.session_id(),
    })
}
