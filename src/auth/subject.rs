//! Request-scoped identity handle.
//!
//! A `Subject` is created for exactly one request. The middleware keeps
//! one clone and places another in the request extensions; the `Arc`
//! interior is what lets the post-dispatch cookie step observe a login or
//! logout performed by the handler.

use crate::auth::{AuthError, Credentials, Realm, SessionManager};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Authentication state held by a logged-in subject.
#[derive(Clone, Debug)]
pub struct AuthDetails {
    pub account_id: String,
    /// Present only for persisted logins and restored sessions.
    pub session_id: Option<String>,
}

/// Authenticated-or-anonymous identity handle bound to one request.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct Subject {
    realm: Arc<dyn Realm>,
    sessions: Arc<dyn SessionManager>,
    details: Arc<RwLock<Option<AuthDetails>>>,
}

impl Subject {
    /// An anonymous subject with no session.
    #[must_use]
    pub fn anonymous(realm: Arc<dyn Realm>, sessions: Arc<dyn SessionManager>) -> Self {
        Self {
            realm,
            sessions,
            details: Arc::new(RwLock::new(None)),
        }
    }

    /// Build a subject for a request, restoring the identified session if
    /// it is still alive. An unknown or absent identifier yields an
    /// anonymous subject.
    pub async fn restore(
        realm: Arc<dyn Realm>,
        sessions: Arc<dyn SessionManager>,
        session_id: Option<String>,
    ) -> Self {
        let subject = Self::anonymous(realm, sessions);

        if let Some(session_id) = session_id {
            if let Ok(account_id) = subject.sessions.restore_session(&session_id).await {
                *subject.details.write() = Some(AuthDetails {
                    account_id,
                    session_id: Some(session_id),
                });
            }
        }

        subject
    }

    /// Attempt to log in with the given credentials.
    ///
    /// With `persist` set, a successful login additionally creates a
    /// session whose identifier ends up in the response cookie. A failed
    /// attempt leaves any prior state untouched.
    ///
    /// # Errors
    /// Propagates the realm's rejection or a session-creation failure.
    pub async fn login(&self, credentials: &Credentials, persist: bool) -> Result<(), AuthError> {
        let account_id = self.realm.authenticate(credentials).await?;

        let session_id = if persist {
            Some(self.sessions.create_session(&account_id).await?)
        } else {
            None
        };

        *self.details.write() = Some(AuthDetails {
            account_id,
            session_id,
        });

        Ok(())
    }

    /// Log out, destroying the held session record if there is one.
    pub async fn logout(&self) {
        let taken = self.details.write().take();
        if let Some(AuthDetails {
            session_id: Some(session_id),
            ..
        }) = taken
        {
            self.sessions.destroy_session(&session_id).await;
        }
    }

    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.details.read().is_some()
    }

    #[must_use]
    pub fn account_id(&self) -> Option<String> {
        self.details
            .read()
            .as_ref()
            .map(|details| details.account_id.clone())
    }

    #[must_use]
    pub fn session_id(&self) -> Option<String> {
        self.details
            .read()
            .as_ref()
            .and_then(|details| details.session_id.clone())
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("details", &*self.details.read())
            .finish_non_exhaustive()
    }
}
