//! Credential verification.

use crate::auth::{AuthError, Credentials};
use async_trait::async_trait;
use base64ct::{Base64UrlUnpadded, Encoding};
use parking_lot::RwLock;
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Verifies credentials and resolves them to an account identifier.
///
/// A realm must handle both credential kinds or return
/// [`AuthError::UnsupportedCredentials`] for the ones it does not.
#[async_trait]
pub trait Realm: Send + Sync {
    /// Authenticate the given credentials, returning the account id.
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError>;
}

/// In-memory realm for tests, demos, and single-process deployments.
///
/// Accounts are registered as id/secret pairs; bearer tokens are issued
/// per account and stay valid until the realm is dropped. All maps sit
/// behind an `RwLock`, so a shared instance is safe under concurrent
/// requests.
#[derive(Default)]
pub struct MemoryRealm {
    accounts: RwLock<HashMap<String, SecretString>>,
    tokens: RwLock<HashMap<String, String>>,
}

impl MemoryRealm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that can log in with `Basic` credentials.
    ///
    /// Re-registering an id replaces its secret.
    pub fn register(&self, id: impl Into<String>, secret: impl Into<String>) {
        self.accounts
            .write()
            .insert(id.into(), SecretString::from(secret.into()));
    }

    /// Issue a bearer token for a registered account.
    ///
    /// # Errors
    /// Returns [`AuthError::UnknownAccount`] if the id is not registered.
    pub fn issue_token(&self, account_id: &str) -> Result<String, AuthError> {
        if !self.accounts.read().contains_key(account_id) {
            return Err(AuthError::UnknownAccount(account_id.to_string()));
        }

        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let token = Base64UrlUnpadded::encode_string(&bytes);

        self.tokens
            .write()
            .insert(token.clone(), account_id.to_string());

        Ok(token)
    }
}

#[async_trait]
impl Realm for MemoryRealm {
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError> {
        match credentials {
            Credentials::Basic { id, secret } => {
                let accounts = self.accounts.read();
                match accounts.get(id) {
                    Some(expected) if expected.expose_secret() == secret.as_str() => Ok(id.clone()),
                    _ => Err(AuthError::InvalidCredentials),
                }
            }
            Credentials::Bearer { token } => self
                .tokens
                .read()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidCredentials),
        }
    }
}
