// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authoriser middleware for Axum.
//!
//! Runs once per request in `authoriser` mode and stores its verdict in the
//! request extensions, where [`super::PrecomputedVerdictResolver`] picks it
//! up. The middleware never rejects a request itself: handlers decide
//! through the facade.
//!
//! ## Checks, in order
//!
//! 1. `Authorization` header present and well-formed, tokens classify
//! 2. Each token's HS512 signature verifies against the configured secret
//! 3. Each token's `exp` has not passed
//! 4. The session store accepts each token's account and session
//!
//! The first failure becomes the verdict.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/v1/whoami", get(whoami))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), authoriser_middleware))
//!     .with_state(state);
//! ```

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use super::resolver::resolve_from_headers;
use super::response::AuthoriserResponse;
use super::session::SessionStore;
use crate::state::AppState;
use crate::token::{verify, Subject, TokenClaims, TokenPair};

/// Compute the verdict and attach it to the request.
pub async fn authoriser_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let verdict = authorise(
        request.headers(),
        &state.auth_config.secret,
        state.sessions.as_ref(),
        chrono::Utc::now().timestamp(),
    );

    tracing::debug!(code = %verdict.code(), "Authoriser verdict");
    request.extensions_mut().insert(verdict);
    next.run(request).await
}

/// Authorise a request's headers at time `now` (seconds since epoch).
pub fn authorise(
    headers: &HeaderMap,
    secret: &str,
    store: &dyn SessionStore,
    now: i64,
) -> AuthoriserResponse {
    let Some(response) = resolve_from_headers(headers) else {
        return AuthoriserResponse::HeaderMissing;
    };

    match first_rejection(&response, secret, store, now) {
        Some(failure) => failure,
        None => response,
    }
}

/// Check every attached token, admin first.
fn first_rejection(
    response: &AuthoriserResponse,
    secret: &str,
    store: &dyn SessionStore,
    now: i64,
) -> Option<AuthoriserResponse> {
    let tokens = response.tokens()?;

    let admin_failure = tokens.admin.as_ref().and_then(|admin| {
        let data = admin.data.data();
        check_principal(admin, Subject::Admin, &data.uid, &data.sid, secret, store, now)
    });

    admin_failure.or_else(|| {
        tokens.actor.as_ref().and_then(|actor| {
            let data = actor.data.data();
            check_principal(actor, Subject::Actor, &data.uid, &data.sid, secret, store, now)
        })
    })
}

fn check_principal<T>(
    pair: &TokenPair<TokenClaims<T>>,
    subject: Subject,
    user_id: &str,
    session_id: &str,
    secret: &str,
    store: &dyn SessionStore,
    now: i64,
) -> Option<AuthoriserResponse> {
    if !verify(&pair.token, secret) {
        tracing::debug!(%subject, user_id, "Token signature rejected");
        return Some(AuthoriserResponse::SessionUnverified);
    }

    if pair.data.is_expired_at(now) {
        tracing::debug!(%subject, user_id, exp = pair.data.exp, "Token expired");
        return Some(AuthoriserResponse::SessionExpired);
    }

    let status = store.lookup(subject, user_id, session_id);
    let failure = status.failure();
    if failure.is_some() {
        tracing::debug!(%subject, user_id, ?status, "Session rejected");
    }
    failure
}
