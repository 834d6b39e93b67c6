use thiserror::Error;

/// Errors surfaced by realms and session managers.
///
/// The middleware discards these on its best-effort login attempt; handlers
/// performing an explicit login (e.g. a login route) are expected to map
/// them to a response of their choosing.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The realm rejected the supplied credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The realm does not support this credential kind.
    #[error("unsupported credential kind")]
    UnsupportedCredentials,

    /// The session identifier does not resolve to a live session.
    #[error("unknown session")]
    UnknownSession,

    /// No account is registered under the given identifier.
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    /// The session backend failed to create or load a record.
    #[error("session backend error: {0}")]
    Session(String),
}
