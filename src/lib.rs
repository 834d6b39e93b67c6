//! # Turnstile (credential and session binding for axum)
//!
//! `turnstile-axum` sits between an axum router and its handlers and makes
//! sure every request carries a [`Subject`](auth::Subject): an
//! authenticated-or-anonymous identity handle resolved from the request's
//! `Authorization` header or `TurnstileSession` cookie.
//!
//! ## Request lifecycle
//!
//! 1. **Pre-dispatch**: read the session cookie, build the `Subject`
//!    (restoring a live session if one exists), parse the `Authorization`
//!    header into [`Credentials`](auth::Credentials), and make a single
//!    best-effort login attempt. A rejected login leaves the subject
//!    anonymous; it never blocks the request.
//! 2. **Dispatch**: the downstream handler runs with the `Subject`
//!    available as a typed request extension.
//! 3. **Post-dispatch**: if the subject holds a session identifier, the
//!    `TurnstileSession` cookie is appended to the response.
//!
//! Authorization decisions are left entirely to handlers inspecting the
//! subject's authenticated state.
//!
//! ## Collaborators
//!
//! Credential verification and session storage are pluggable behind the
//! [`Realm`](auth::Realm) and [`SessionManager`](auth::SessionManager)
//! traits. In-memory implementations are provided for tests, demos, and
//! single-process deployments.

pub mod auth;
pub mod cli;
pub mod middleware;
pub mod server;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
