// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claim shapes shared by every credential kind.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current schema version of the claim payload (`v`).
pub const TOKEN_DATA_VERSION: u32 = 1;

/// Token issuer.
///
/// Only one issuer exists today; keeping it closed means a typo can never
/// produce a token that decodes but cannot be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Issuer {
    /// Tokens issued to users of the platform
    User,
}

impl Issuer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Issuer::User => "user",
        }
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token subject: which principal kind the token represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// End user, possibly proxied by an admin
    Actor,
    /// Operator
    Admin,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Actor => "actor",
            Subject::Admin => "admin",
        }
    }

    /// Parse a `sub` claim. Exact match only.
    pub fn parse(s: &str) -> Option<Subject> {
        match s {
            "actor" => Some(Subject::Actor),
            "admin" => Some(Subject::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller data wrapped with a schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDataWithVersion<T> {
    /// Schema version of `data`
    pub v: u32,

    #[serde(flatten)]
    pub data: T,
}

impl<T> TokenDataWithVersion<T> {
    /// Wrap `data` with the current schema version.
    pub fn new(data: T) -> Self {
        Self {
            v: TOKEN_DATA_VERSION,
            data,
        }
    }
}

/// Full claim set of a signed token.
///
/// `exp >= iat` holds for tokens produced by the signer but is not checked
/// when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims<T> {
    /// Issuer
    pub iss: Issuer,

    /// Subject (principal kind)
    pub sub: Subject,

    /// Issued at (seconds since epoch)
    pub iat: i64,

    /// Expiration (seconds since epoch)
    pub exp: i64,

    #[serde(flatten)]
    pub payload: TokenDataWithVersion<T>,
}

impl<T> TokenClaims<T> {
    /// Shortcut to the principal-specific data.
    pub fn data(&self) -> &T {
        &self.payload.data
    }

    /// Whether `exp` lies strictly before `now` (seconds since epoch).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }
}

/// A raw token string together with its decoded claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair<T> {
    pub token: String,
    pub data: T,
}

impl<T> TokenPair<T> {
    /// Re-type the decoded data, keeping the raw token.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<TokenPair<U>, E> {
        Ok(TokenPair {
            token: self.token,
            data: f(self.data)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        uid: String,
    }

    #[test]
    fn claims_serialize_flat() {
        let claims = TokenClaims {
            iss: Issuer::User,
            sub: Subject::Admin,
            iat: 1700000000,
            exp: 1700003600,
            payload: TokenDataWithVersion::new(Sample {
                uid: "user_123".to_string(),
            }),
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "iss": "user",
                "sub": "admin",
                "iat": 1700000000,
                "exp": 1700003600,
                "v": 1,
                "uid": "user_123",
            })
        );

        let back: TokenClaims<Sample> = serde_json::from_value(value).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn subject_parse_is_exact() {
        assert_eq!(Subject::parse("actor"), Some(Subject::Actor));
        assert_eq!(Subject::parse("admin"), Some(Subject::Admin));
        assert_eq!(Subject::parse("Admin"), None);
        assert_eq!(Subject::parse("operator"), None);
    }

    #[test]
    fn unknown_issuer_is_rejected() {
        let result = serde_json::from_value::<Issuer>(serde_json::json!("service"));
        assert!(result.is_err());
    }

    #[test]
    fn expiry_check_is_strict() {
        let claims = TokenClaims {
            iss: Issuer::User,
            sub: Subject::Actor,
            iat: 100,
            exp: 200,
            payload: TokenDataWithVersion::new(()),
        };
        assert!(!claims.is_expired_at(200));
        assert!(claims.is_expired_at(201));
    }
}
