// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authoriser verdict protocol.
//!
//! An upstream authoriser runs once per request and hands its verdict to the
//! handler as an [`AuthoriserResponse`]. Every way authentication can end is
//! one code of the closed [`AuthoriserResponseCode`] set.
//!
//! ## Wire Format
//!
//! ```json
//! { "code": "session:expired" }
//! { "code": "success", "tokens": { "actor": { "token": "...", "data": { ... } } } }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::token::{ActorToken, AdminToken, TokenPair};

/// Every possible authoriser outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthoriserResponseCode {
    /// Identity belongs to a deactivated account
    #[serde(rename = "account:inactive")]
    AccountInactive,
    /// Verdict missing or corrupted in the request context
    #[serde(rename = "authoriser:unknown")]
    AuthoriserUnknown,
    /// No Authorization header present
    #[serde(rename = "header:missing")]
    HeaderMissing,
    /// Header well-formed but a token failed to decode or classify
    #[serde(rename = "token:invalid")]
    TokenInvalid,
    /// Header present but not `Bearer` syntax
    #[serde(rename = "token:malformed")]
    TokenMalformed,
    /// Signature or session check failed
    #[serde(rename = "session:unverified")]
    SessionUnverified,
    /// Session expired
    #[serde(rename = "session:expired")]
    SessionExpired,
    /// Session record not found
    #[serde(rename = "session:missing")]
    SessionMissing,
    /// Authenticated
    #[serde(rename = "success")]
    Success,
}

impl AuthoriserResponseCode {
    /// All codes, failures first.
    pub const ALL: [AuthoriserResponseCode; 9] = [
        AuthoriserResponseCode::AccountInactive,
        AuthoriserResponseCode::AuthoriserUnknown,
        AuthoriserResponseCode::HeaderMissing,
        AuthoriserResponseCode::TokenInvalid,
        AuthoriserResponseCode::TokenMalformed,
        AuthoriserResponseCode::SessionUnverified,
        AuthoriserResponseCode::SessionExpired,
        AuthoriserResponseCode::SessionMissing,
        AuthoriserResponseCode::Success,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthoriserResponseCode::AccountInactive => "account:inactive",
            AuthoriserResponseCode::AuthoriserUnknown => "authoriser:unknown",
            AuthoriserResponseCode::HeaderMissing => "header:missing",
            AuthoriserResponseCode::TokenInvalid => "token:invalid",
            AuthoriserResponseCode::TokenMalformed => "token:malformed",
            AuthoriserResponseCode::SessionUnverified => "session:unverified",
            AuthoriserResponseCode::SessionExpired => "session:expired",
            AuthoriserResponseCode::SessionMissing => "session:missing",
            AuthoriserResponseCode::Success => "success",
        }
    }
}

impl fmt::Display for AuthoriserResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown response code string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown authoriser response code: {0}")]
pub struct UnknownResponseCode(pub String);

impl FromStr for AuthoriserResponseCode {
    type Err = UnknownResponseCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownResponseCode(s.to_string()))
    }
}

/// Decoded tokens attached to a successful verdict.
///
/// Any combination is legal: actor only, admin only, both (an admin acting
/// as the actor) or neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthoriserTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<TokenPair<ActorToken>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<TokenPair<AdminToken>>,
}

/// Authoriser verdict.
///
/// Only `Success` carries tokens; the other variants cannot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum AuthoriserResponse {
    #[serde(rename = "account:inactive")]
    AccountInactive,
    #[serde(rename = "authoriser:unknown")]
    AuthoriserUnknown,
    #[serde(rename = "header:missing")]
    HeaderMissing,
    #[serde(rename = "token:invalid")]
    TokenInvalid,
    #[serde(rename = "token:malformed")]
    TokenMalformed,
    #[serde(rename = "session:unverified")]
    SessionUnverified,
    #[serde(rename = "session:expired")]
    SessionExpired,
    #[serde(rename = "session:missing")]
    SessionMissing,
    #[serde(rename = "success")]
    Success {
        #[serde(default)]
        tokens: AuthoriserTokens,
    },
}

impl AuthoriserResponse {
    /// Successful verdict with the given tokens.
    pub fn success(tokens: AuthoriserTokens) -> Self {
        AuthoriserResponse::Success { tokens }
    }

    /// Failure verdict for `code`.
    ///
    /// `Success` maps to a success without tokens.
    pub fn from_code(code: AuthoriserResponseCode) -> Self {
        match code {
            AuthoriserResponseCode::AccountInactive => AuthoriserResponse::AccountInactive,
            AuthoriserResponseCode::AuthoriserUnknown => AuthoriserResponse::AuthoriserUnknown,
            AuthoriserResponseCode::HeaderMissing => AuthoriserResponse::HeaderMissing,
            AuthoriserResponseCode::TokenInvalid => AuthoriserResponse::TokenInvalid,
            AuthoriserResponseCode::TokenMalformed => AuthoriserResponse::TokenMalformed,
            AuthoriserResponseCode::SessionUnverified => AuthoriserResponse::SessionUnverified,
            AuthoriserResponseCode::SessionExpired => AuthoriserResponse::SessionExpired,
            AuthoriserResponseCode::SessionMissing => AuthoriserResponse::SessionMissing,
            AuthoriserResponseCode::Success => AuthoriserResponse::success(AuthoriserTokens::default()),
        }
    }

    pub fn code(&self) -> AuthoriserResponseCode {
        match self {
            AuthoriserResponse::AccountInactive => AuthoriserResponseCode::AccountInactive,
            AuthoriserResponse::AuthoriserUnknown => AuthoriserResponseCode::AuthoriserUnknown,
            AuthoriserResponse::HeaderMissing => AuthoriserResponseCode::HeaderMissing,
            AuthoriserResponse::TokenInvalid => AuthoriserResponseCode::TokenInvalid,
            AuthoriserResponse::TokenMalformed => AuthoriserResponseCode::TokenMalformed,
            AuthoriserResponse::SessionUnverified => AuthoriserResponseCode::SessionUnverified,
            AuthoriserResponse::SessionExpired => AuthoriserResponseCode::SessionExpired,
            AuthoriserResponse::SessionMissing => AuthoriserResponseCode::SessionMissing,
            AuthoriserResponse::Success { .. } => AuthoriserResponseCode::Success,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthoriserResponse::Success { .. })
    }

    /// Attached tokens, only for `Success`.
    pub fn tokens(&self) -> Option<&AuthoriserTokens> {
        match self {
            AuthoriserResponse::Success { tokens } => Some(tokens),
            _ => None,
        }
    }
}

impl From<AuthoriserResponseCode> for AuthoriserResponse {
    fn from(code: AuthoriserResponseCode) -> Self {
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codes_round_trip_through_strings() {
        for code in AuthoriserResponseCode::ALL {
            assert_eq!(code.as_str().parse::<AuthoriserResponseCode>(), Ok(code));
            assert_eq!(serde_json::to_value(code).unwrap(), json!(code.as_str()));
        }
        assert!("token:forged".parse::<AuthoriserResponseCode>().is_err());
    }

    #[test]
    fn response_code_matches_variant() {
        for code in AuthoriserResponseCode::ALL {
            assert_eq!(AuthoriserResponse::from_code(code).code(), code);
        }
    }

    #[test]
    fn failure_serializes_as_code_only() {
        let value = serde_json::to_value(AuthoriserResponse::SessionExpired).unwrap();
        assert_eq!(value, json!({ "code": "session:expired" }));
    }

    #[test]
    fn failure_ignores_stray_tokens() {
        let value = json!({ "code": "token:invalid", "tokens": { "actor": null } });
        let response: AuthoriserResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response, AuthoriserResponse::TokenInvalid);
        assert!(response.tokens().is_none());
    }

    #[test]
    fn success_without_tokens_deserializes() {
        let response: AuthoriserResponse =
            serde_json::from_value(json!({ "code": "success" })).unwrap();
        assert_eq!(response, AuthoriserResponse::success(AuthoriserTokens::default()));
        assert!(response.is_success());
    }

    #[test]
    fn success_with_actor_deserializes() {
        let value = json!({
            "code": "success",
            "tokens": {
                "actor": {
                    "token": "a.b.c",
                    "data": {
                        "iss": "user",
                        "sub": "actor",
                        "iat": 100,
                        "exp": 200,
                        "v": 1,
                        "uid": "user_123",
                        "sid": "sess_abc",
                        "proxy": true
                    }
                }
            }
        });

        let response: AuthoriserResponse = serde_json::from_value(value.clone()).unwrap();
        let tokens = response.tokens().unwrap();
        let actor = tokens.actor.as_ref().unwrap();
        assert_eq!(actor.token, "a.b.c");
        assert_eq!(actor.data.data().uid, "user_123");
        assert_eq!(actor.data.data().proxy, Some(true));
        assert!(tokens.admin.is_none());

        assert_eq!(serde_json::to_value(&response).unwrap(), value);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let result = serde_json::from_value::<AuthoriserResponse>(json!({ "code": "root" }));
        assert!(result.is_err());
    }
}
