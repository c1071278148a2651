// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authoriser verdict resolution.
//!
//! ## Strategies
//!
//! - [`LocalHeaderResolver`] (local/dev): reads the `Authorization` header
//!   in-process and classifies the tokens it carries. No signature check.
//! - [`PrecomputedVerdictResolver`] (production): reads the verdict the
//!   authoriser step already placed in the request context. No
//!   cryptographic work at all.
//!
//! Both produce the same [`AuthoriserResponse`], so handlers never know
//! which deployment they run in.

use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};
use serde_json::Value;

use super::header::parse_bearer_tokens;
use super::response::{AuthoriserResponse, AuthoriserTokens};
use crate::token::{decode_unverified, ActorToken, AdminToken, Subject};

/// Turns an incoming request into an authoriser verdict.
pub trait ResolveAuthoriser {
    fn resolve(&self, parts: &Parts) -> AuthoriserResponse;
}

/// Resolves from the request's `Authorization` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHeaderResolver;

impl ResolveAuthoriser for LocalHeaderResolver {
    fn resolve(&self, parts: &Parts) -> AuthoriserResponse {
        resolve_from_headers(&parts.headers).unwrap_or(AuthoriserResponse::HeaderMissing)
    }
}

/// Resolves from a verdict stored in request extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecomputedVerdictResolver;

impl ResolveAuthoriser for PrecomputedVerdictResolver {
    fn resolve(&self, parts: &Parts) -> AuthoriserResponse {
        resolve_from_verdict(parts.extensions.get::<AuthoriserResponse>())
    }
}

/// Resolve from request headers.
///
/// Returns `None` when there is no `Authorization` header at all; the
/// caller decides whether that means `header:missing`. Header names are
/// matched case-insensitively.
pub fn resolve_from_headers(headers: &HeaderMap) -> Option<AuthoriserResponse> {
    let value = headers.get(AUTHORIZATION)?;
    let response = match value.to_str() {
        Ok(header) => resolve_authorization(header),
        Err(_) => {
            tracing::debug!("Authorization header is not valid ASCII");
            AuthoriserResponse::TokenMalformed
        }
    };
    Some(response)
}

/// Resolve a raw `Authorization` header value.
pub fn resolve_authorization(header: &str) -> AuthoriserResponse {
    match parse_bearer_tokens(header) {
        Some(tokens) => classify_tokens(&tokens),
        None => {
            tracing::debug!("Authorization header is not bearer syntax");
            AuthoriserResponse::TokenMalformed
        }
    }
}

/// Sort decoded tokens into actor/admin slots by their `sub` claim.
///
/// Fails fast: the first token that does not decode, carries an unknown
/// subject, or duplicates a filled slot makes the whole header invalid.
fn classify_tokens(tokens: &[String]) -> AuthoriserResponse {
    let mut slots = AuthoriserTokens::default();

    for token in tokens {
        let Some(pair) = decode_unverified::<Value>(token) else {
            tracing::debug!("Bearer token did not decode");
            return AuthoriserResponse::TokenInvalid;
        };

        let subject = pair
            .data
            .get("sub")
            .and_then(Value::as_str)
            .and_then(Subject::parse);

        let filled = match subject {
            Some(Subject::Actor) if slots.actor.is_none() => pair
                .try_map(serde_json::from_value::<ActorToken>)
                .map(|actor| slots.actor = Some(actor))
                .is_ok(),
            Some(Subject::Admin) if slots.admin.is_none() => pair
                .try_map(serde_json::from_value::<AdminToken>)
                .map(|admin| slots.admin = Some(admin))
                .is_ok(),
            _ => false,
        };

        if !filled {
            tracing::debug!(?subject, "Bearer token could not be classified");
            return AuthoriserResponse::TokenInvalid;
        }
    }

    AuthoriserResponse::success(slots)
}

/// Return a precomputed verdict, or `authoriser:unknown` if there is none.
pub fn resolve_from_verdict(verdict: Option<&AuthoriserResponse>) -> AuthoriserResponse {
    match verdict {
        Some(response) => response.clone(),
        None => {
            tracing::warn!("Authoriser verdict missing from request context");
            AuthoriserResponse::AuthoriserUnknown
        }
    }
}

/// Return a verdict carried as JSON in a platform authoriser context.
///
/// Absent, `null` and undeserialisable values are all `authoriser:unknown`.
pub fn resolve_from_context(context: Option<&Value>) -> AuthoriserResponse {
    let verdict = context
        .filter(|value| !value.is_null())
        .and_then(|value| match serde_json::from_value::<AuthoriserResponse>(value.clone()) {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::warn!(error = %e, "Authoriser verdict in request context is corrupt");
                None
            }
        });

    resolve_from_verdict(verdict.as_ref())
}
