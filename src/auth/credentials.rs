//! `Authorization` header parsing.
//!
//! Scheme prefixes are matched literally and case-sensitively, trailing
//! space included. Anything malformed degrades to "no credentials" rather
//! than an error; the request still reaches its handler anonymously.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64ct::{Base64, Encoding};
use std::fmt;

/// Parsed representation of an `Authorization` header value.
///
/// Absence (missing header, unrecognized scheme, malformed payload) is
/// modeled as `Option<Credentials>::None` at the parsing call sites.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Basic` scheme: Base64-encoded `id:secret` pair.
    Basic { id: String, secret: String },
    /// `Bearer` scheme: opaque token.
    Bearer { token: String },
}

impl Credentials {
    /// Parse a single `Authorization` header value.
    ///
    /// `Basic` payloads must be standard padded Base64 decoding to UTF-8
    /// with at least one `:`; the split happens at the FIRST colon, so a
    /// secret may itself contain colons while the id cannot.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        if let Some(payload) = header.strip_prefix("Basic ") {
            let decoded = Base64::decode_vec(payload).ok()?;
            let text = String::from_utf8(decoded).ok()?;
            let (id, secret) = text.split_once(':')?;
            Some(Self::Basic {
                id: id.to_string(),
                secret: secret.to_string(),
            })
        } else if let Some(token) = header.strip_prefix("Bearer ") {
            Some(Self::Bearer {
                token: token.to_string(),
            })
        } else {
            None
        }
    }

    /// Parse the `Authorization` header out of a request's header map.
    ///
    /// Header values that are not visible ASCII degrade to `None` like any
    /// other malformed input.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()
            .and_then(Self::parse)
    }
}

// Keep secrets out of logs; only the account id is loggable.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { id, .. } => f
                .debug_struct("Basic")
                .field("id", id)
                .field("secret", &"<redacted>")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn basic(payload: &str) -> String {
        format!("Basic {}", Base64::encode_string(payload.as_bytes()))
    }

    #[test]
    fn parse_basic_id_and_secret() {
        assert_eq!(
            Credentials::parse(&basic("alice:opensesame")),
            Some(Credentials::Basic {
                id: "alice".to_string(),
                secret: "opensesame".to_string(),
            })
        );
    }

    #[test]
    fn parse_basic_splits_at_first_colon() {
        assert_eq!(
            Credentials::parse(&basic("alice:p@ss:word")),
            Some(Credentials::Basic {
                id: "alice".to_string(),
                secret: "p@ss:word".to_string(),
            })
        );
    }

    #[test]
    fn parse_basic_allows_empty_secret() {
        assert_eq!(
            Credentials::parse(&basic("alice:")),
            Some(Credentials::Basic {
                id: "alice".to_string(),
                secret: String::new(),
            })
        );
    }

    #[test]
    fn parse_basic_rejects_invalid_base64() {
        assert_eq!(Credentials::parse("Basic %%%invalid%%%"), None);
    }

    #[test]
    fn parse_basic_rejects_missing_separator() {
        assert_eq!(Credentials::parse(&basic("no-colon-here")), None);
    }

    #[test]
    fn parse_basic_rejects_non_utf8_payload() {
        let header = format!("Basic {}", Base64::encode_string(&[0xff, 0xfe, 0x3a]));
        assert_eq!(Credentials::parse(&header), None);
    }

    #[test]
    fn parse_bearer_keeps_token_verbatim() {
        assert_eq!(
            Credentials::parse("Bearer abc123"),
            Some(Credentials::Bearer {
                token: "abc123".to_string(),
            })
        );
    }

    #[test]
    fn parse_prefixes_are_case_sensitive() {
        assert_eq!(Credentials::parse(&basic("a:b").to_lowercase()), None);
        assert_eq!(Credentials::parse("bearer abc123"), None);
        assert_eq!(Credentials::parse("BEARER abc123"), None);
    }

    #[test]
    fn parse_rejects_unknown_scheme() {
        assert_eq!(Credentials::parse("Digest qop=auth"), None);
        assert_eq!(Credentials::parse(""), None);
    }

    #[test]
    fn from_headers_reads_authorization() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(
            Credentials::from_headers(&headers),
            Some(Credentials::Bearer {
                token: "abc123".to_string(),
            })
        );
    }

    #[test]
    fn from_headers_none_when_absent() {
        assert_eq!(Credentials::from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = Credentials::parse(&basic("alice:hunter2"));
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
