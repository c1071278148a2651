// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS512 token signing and signature verification.
//!
//! ## Expiry
//!
//! `verify` deliberately ignores `exp` and `nbf`. Whether an expired but
//! correctly signed token is acceptable is a policy decision for the caller
//! (see the authoriser middleware), not a cryptographic one.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use super::claims::{Issuer, Subject, TokenDataWithVersion};

/// The single supported signing algorithm.
const ALGORITHM: Algorithm = Algorithm::HS512;

/// Errors produced while signing.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Options injected into the claims at sign time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignOptions {
    pub issuer: Issuer,
    pub subject: Subject,
    /// Lifetime in seconds, added to `iat` to produce `exp`
    pub expires_in: u64,
}

/// Sign a versioned payload with `secret`.
///
/// `iat` is the current time; `exp` is `iat + expires_in`.
pub fn sign<T: Serialize>(
    data: &TokenDataWithVersion<T>,
    secret: &str,
    options: &SignOptions,
) -> Result<String, TokenError> {
    let iat = chrono::Utc::now().timestamp();
    let exp = iat.saturating_add(i64::try_from(options.expires_in).unwrap_or(i64::MAX));

    let claims = SignedClaims {
        iss: options.issuer,
        sub: options.subject,
        iat,
        exp,
        payload: data,
    };

    encode_claims(&claims, secret)
}

/// Borrowing twin of [`super::claims::TokenClaims`] used on the signing path.
#[derive(Serialize)]
struct SignedClaims<'a, T> {
    iss: Issuer,
    sub: Subject,
    iat: i64,
    exp: i64,
    #[serde(flatten)]
    payload: &'a TokenDataWithVersion<T>,
}

/// Encode an already-built claim set. Used directly by tests that need
/// fixed timestamps.
pub(crate) fn encode_claims<C: Serialize>(claims: &C, secret: &str) -> Result<String, TokenError> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::new(ALGORITHM), claims, &key)?)
}

/// Why a token was not trusted. Never leaves this module.
#[derive(Debug)]
enum VerifyFailure {
    Rejected(jsonwebtoken::errors::Error),
    NotAnObject,
}

impl std::fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyFailure::Rejected(e) => write!(f, "signature rejected: {e}"),
            VerifyFailure::NotAnObject => f.write_str("payload is not a JSON object"),
        }
    }
}

/// Check the token's signature against `secret`.
///
/// Returns `false` for a bad signature, a malformed token, or a payload
/// that is not a JSON object. Expiry is not checked.
pub fn verify(token: &str, secret: &str) -> bool {
    match check_signature(token, secret) {
        Ok(()) => true,
        Err(failure) => {
            tracing::debug!(%failure, "Token verification failed");
            false
        }
    }
}

fn check_signature(token: &str, secret: &str) -> Result<(), VerifyFailure> {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<serde_json::Value>(token, &key, &validation)
        .map_err(VerifyFailure::Rejected)?;

    if !token_data.claims.is_object() {
        return Err(VerifyFailure::NotAnObject);
    }

    Ok(())
}
