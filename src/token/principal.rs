// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Actor and admin token shapes and their factories.
//!
//! The factories pin issuer, subject and schema version so callers cannot
//! mix them up between principal kinds.

use serde::{Deserialize, Serialize};

use super::claims::{Issuer, Subject, TokenClaims, TokenDataWithVersion, TokenPair};
use super::codec::decode_unverified;
use super::signer::{sign, SignOptions, TokenError};

/// Data carried by an actor token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorTokenData {
    /// User ID
    pub uid: String,

    /// Session ID
    pub sid: String,

    /// Set when an admin is impersonating this actor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<bool>,
}

/// Data carried by an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminTokenData {
    /// User ID
    pub uid: String,

    /// Session ID
    pub sid: String,
}

pub type ActorToken = TokenClaims<ActorTokenData>;
pub type AdminToken = TokenClaims<AdminTokenData>;

/// Sign an actor token valid for `expires_in` seconds.
pub fn sign_actor_token(
    data: &ActorTokenData,
    secret: &str,
    expires_in: u64,
) -> Result<String, TokenError> {
    sign(
        &TokenDataWithVersion::new(data),
        secret,
        &SignOptions {
            issuer: Issuer::User,
            subject: Subject::Actor,
            expires_in,
        },
    )
}

/// Sign an admin token valid for `expires_in` seconds.
pub fn sign_admin_token(
    data: &AdminTokenData,
    secret: &str,
    expires_in: u64,
) -> Result<String, TokenError> {
    sign(
        &TokenDataWithVersion::new(data),
        secret,
        &SignOptions {
            issuer: Issuer::User,
            subject: Subject::Admin,
            expires_in,
        },
    )
}

/// Decode an actor token without verifying it. `None` unless `sub` is `actor`.
pub fn decode_actor_token(token: &str) -> Option<TokenPair<ActorToken>> {
    decode_unverified::<ActorToken>(token).filter(|pair| pair.data.sub == Subject::Actor)
}

/// Decode an admin token without verifying it. `None` unless `sub` is `admin`.
pub fn decode_admin_token(token: &str) -> Option<TokenPair<AdminToken>> {
    decode_unverified::<AdminToken>(token).filter(|pair| pair.data.sub == Subject::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::claims::TOKEN_DATA_VERSION;
    use crate::token::signer::verify;

    fn actor(proxy: Option<bool>) -> ActorTokenData {
        ActorTokenData {
            uid: "user_123".to_string(),
            sid: "sess_abc".to_string(),
            proxy,
        }
    }

    #[test]
    fn actor_token_carries_fixed_claims() {
        let token = sign_actor_token(&actor(None), "secret", 60).unwrap();
        let pair = decode_actor_token(&token).unwrap();

        assert_eq!(pair.data.iss, Issuer::User);
        assert_eq!(pair.data.sub, Subject::Actor);
        assert_eq!(pair.data.payload.v, TOKEN_DATA_VERSION);
        assert_eq!(pair.data.data(), &actor(None));
        assert_eq!(pair.data.exp - pair.data.iat, 60);
        assert!(verify(&token, "secret"));
    }

    #[test]
    fn proxy_flag_is_omitted_when_unset() {
        let token = sign_actor_token(&actor(None), "secret", 60).unwrap();
        let raw = decode_unverified::<serde_json::Value>(&token).unwrap();
        assert!(raw.data.get("proxy").is_none());

        let token = sign_actor_token(&actor(Some(true)), "secret", 60).unwrap();
        let pair = decode_actor_token(&token).unwrap();
        assert_eq!(pair.data.data().proxy, Some(true));
    }

    #[test]
    fn admin_token_carries_fixed_claims() {
        let data = AdminTokenData {
            uid: "op_1".to_string(),
            sid: "sess_op".to_string(),
        };
        let token = sign_admin_token(&data, "secret", 120).unwrap();
        let pair = decode_admin_token(&token).unwrap();

        assert_eq!(pair.data.sub, Subject::Admin);
        assert_eq!(pair.data.data(), &data);
        assert_eq!(pair.data.exp - pair.data.iat, 120);
    }

    #[test]
    fn typed_decoders_check_subject() {
        let token = sign_actor_token(&actor(None), "secret", 60).unwrap();
        assert!(decode_admin_token(&token).is_none());

        let token = sign_admin_token(
            &AdminTokenData {
                uid: "op_1".to_string(),
                sid: "sess_op".to_string(),
            },
            "secret",
            60,
        )
        .unwrap();
        assert!(decode_actor_token(&token).is_none());
    }
}
