// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::response::AuthoriserResponseCode;

/// Diagnostic header carrying the authoriser response code on rejections.
pub const AUTHORISER_CODE_HEADER: &str = "x-authoriser-code";

/// Why a handler could not obtain the principal it asked for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The authoriser verdict was not `success`
    #[error("Authorisation failed: {code}")]
    AuthorisationFailure { code: AuthoriserResponseCode },

    /// Authorised, but no actor token was presented
    #[error("Actor authentication is required")]
    ActorAuthenticationRequired,

    /// Authorised, but no admin token was presented
    #[error("Admin authentication is required")]
    AdminAuthenticationRequired,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::AuthorisationFailure { .. } => "authorisation_failure",
            AuthError::ActorAuthenticationRequired => "actor_authentication_required",
            AuthError::AdminAuthenticationRequired => "admin_authentication_required",
        }
    }

    /// Authoriser response code behind this error.
    ///
    /// The two "principal required" errors come from a successful verdict.
    pub fn authoriser_code(&self) -> AuthoriserResponseCode {
        match self {
            AuthError::AuthorisationFailure { code } => *code,
            AuthError::ActorAuthenticationRequired | AuthError::AdminAuthenticationRequired => {
                AuthoriserResponseCode::Success
            }
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = HeaderValue::from_static(self.authoriser_code().as_str());
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, [(AUTHORISER_CODE_HEADER, code)], body).into_response()
    }
}
