// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors over the authentication facade.
//!
//! ```rust,ignore
//! async fn my_handler(Actor(actor): Actor) -> impl IntoResponse {
//!     // actor.user_id(), actor.session_id(), actor.is_proxied()
//! }
//! ```
//!
//! Where the verdict comes from depends on [`AuthMode`]: in `local` mode
//! the `Authorization` header is resolved in place, in `authoriser` mode
//! the middleware's verdict is read from the request extensions.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use super::facade::{ActorInspector, AdminInspector, HttpAuthentication};
use super::resolver::{LocalHeaderResolver, PrecomputedVerdictResolver, ResolveAuthoriser};
use super::AuthError;
use crate::config::AuthMode;
use crate::state::AppState;

/// Resolution strategy for a deployment mode.
pub fn resolver_for(mode: AuthMode) -> &'static dyn ResolveAuthoriser {
    match mode {
        AuthMode::Local => &LocalHeaderResolver,
        AuthMode::Authoriser => &PrecomputedVerdictResolver,
    }
}

/// The facade for the current request. Never rejects.
///
/// Use this when a handler accepts more than one principal kind.
pub struct Authentication(pub HttpAuthentication);

impl FromRequestParts<AppState> for Authentication {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let response = resolver_for(state.auth_config.mode).resolve(parts);
        Ok(Authentication(HttpAuthentication::new(response)))
    }
}

/// Extractor that requires an actor token.
pub struct Actor(pub ActorInspector);

impl FromRequestParts<AppState> for Actor {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Authentication(auth) = Authentication::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        Ok(Actor(auth.actor()?))
    }
}

/// Extractor that requires an admin token.
pub struct Admin(pub AdminInspector);

impl FromRequestParts<AppState> for Admin {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Authentication(auth) = Authentication::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        Ok(Admin(auth.admin()?))
    }
}
