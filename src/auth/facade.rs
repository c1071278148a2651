// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed access to the principals behind an authoriser verdict.
//!
//! Failures come in two levels:
//!
//! - [`AuthError::AuthorisationFailure`]: the verdict itself was not
//!   `success` (not logged in, expired session, ...)
//! - [`AuthError::ActorAuthenticationRequired`] /
//!   [`AuthError::AdminAuthenticationRequired`]: logged in, but not as the
//!   principal kind the handler asked for
//!
//! An endpoint that accepts either principal can try `admin()` then
//! `actor()` without conflating the two.

use super::error::AuthError;
use super::response::AuthoriserResponse;
use crate::token::{ActorToken, AdminToken, TokenPair};

/// Wraps one authoriser verdict for a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpAuthentication {
    response: AuthoriserResponse,
}

impl HttpAuthentication {
    pub fn new(response: AuthoriserResponse) -> Self {
        Self { response }
    }

    /// The wrapped verdict.
    pub fn response(&self) -> &AuthoriserResponse {
        &self.response
    }

    /// True iff the verdict is `success`.
    pub fn is_authorised(&self) -> bool {
        self.response.is_success()
    }

    /// The authenticated actor.
    pub fn actor(&self) -> Result<ActorInspector, AuthError> {
        match &self.response {
            AuthoriserResponse::Success { tokens } => tokens
                .actor
                .clone()
                .map(ActorInspector::new)
                .ok_or(AuthError::ActorAuthenticationRequired),
            other => Err(AuthError::AuthorisationFailure { code: other.code() }),
        }
    }

    /// The authenticated admin.
    pub fn admin(&self) -> Result<AdminInspector, AuthError> {
        match &self.response {
            AuthoriserResponse::Success { tokens } => tokens
                .admin
                .clone()
                .map(AdminInspector::new)
                .ok_or(AuthError::AdminAuthenticationRequired),
            other => Err(AuthError::AuthorisationFailure { code: other.code() }),
        }
    }
}

impl From<AuthoriserResponse> for HttpAuthentication {
    fn from(response: AuthoriserResponse) -> Self {
        Self::new(response)
    }
}

/// Read-only view of an actor token.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorInspector {
    pair: TokenPair<ActorToken>,
}

impl ActorInspector {
    pub fn new(pair: TokenPair<ActorToken>) -> Self {
        Self { pair }
    }

    pub fn user_id(&self) -> &str {
        &self.pair.data.data().uid
    }

    pub fn session_id(&self) -> &str {
        &self.pair.data.data().sid
    }

    /// Whether an admin is acting as this user.
    pub fn is_proxied(&self) -> bool {
        self.pair.data.data().proxy.unwrap_or(false)
    }

    /// Raw signed token.
    pub fn token(&self) -> &str {
        &self.pair.token
    }

    pub fn claims(&self) -> &ActorToken {
        &self.pair.data
    }
}

/// Read-only view of an admin token.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminInspector {
    pair: TokenPair<AdminToken>,
}

impl AdminInspector {
    pub fn new(pair: TokenPair<AdminToken>) -> Self {
        Self { pair }
    }

    pub fn user_id(&self) -> &str {
        &self.pair.data.data().uid
    }

    pub fn session_id(&self) -> &str {
        &self.pair.data.data().sid
    }

    /// Raw signed token.
    pub fn token(&self) -> &str {
        &self.pair.token
    }

    pub fn claims(&self) -> &AdminToken {
        &self.pair.data
    }
}
