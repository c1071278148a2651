// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity endpoints.

use axum::Json;

use crate::auth::{Actor, Admin, AuthError, Authentication};
use crate::models::{PrincipalResponse, WhoAmIResponse};

/// Get every principal on the current request.
///
/// Accepts an actor token, an admin token, or both.
#[utoipa::path(
    get,
    path = "/v1/whoami",
    tag = "Identity",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Authenticated principals", body = WhoAmIResponse),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn whoami(Authentication(auth): Authentication) -> Result<Json<WhoAmIResponse>, AuthError> {
    let actor = match auth.actor() {
        Ok(actor) => Some(PrincipalResponse::from(&actor)),
        Err(AuthError::ActorAuthenticationRequired) => None,
        Err(e) => return Err(e),
    };
    let admin = auth.admin().ok().map(|admin| PrincipalResponse::from(&admin));

    if actor.is_none() && admin.is_none() {
        return Err(AuthError::ActorAuthenticationRequired);
    }

    Ok(Json(WhoAmIResponse { actor, admin }))
}

/// Get the authenticated actor.
#[utoipa::path(
    get,
    path = "/v1/actor/me",
    tag = "Identity",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Actor identity", body = PrincipalResponse),
        (status = 401, description = "No authenticated actor"),
    )
)]
pub async fn actor_me(Actor(actor): Actor) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(&actor))
}

/// Get the authenticated admin.
#[utoipa::path(
    get,
    path = "/v1/admin/me",
    tag = "Identity",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Admin identity", body = PrincipalResponse),
        (status = 401, description = "No authenticated admin"),
    )
)]
pub async fn admin_me(Admin(admin): Admin) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(&admin))
}
