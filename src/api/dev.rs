// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Development token issuance.
//!
//! Stands in for a login flow: opens sessions in the in-memory store and
//! signs tokens for them.

use axum::{extract::State, Json};

use crate::auth::{compose_bearer_header, NamedTokens};
use crate::error::ApiError;
use crate::models::{IssueTokensRequest, IssueTokensResponse};
use crate::state::AppState;
use crate::token::{sign_actor_token, sign_admin_token, ActorTokenData, AdminTokenData, Subject};

/// Issue actor and/or admin tokens.
///
/// When both are requested the actor token is marked as proxied. Only
/// mounted in `local` mode.
#[utoipa::path(
    post,
    path = "/v1/dev/tokens",
    request_body = IssueTokensRequest,
    tag = "Development",
    responses(
        (status = 200, description = "Tokens issued", body = IssueTokensResponse),
        (status = 400, description = "No principal requested"),
    )
)]
pub async fn issue_tokens(
    State(state): State<AppState>,
    Json(request): Json<IssueTokensRequest>,
) -> Result<Json<IssueTokensResponse>, ApiError> {
    let secret = &state.auth_config.secret;
    let expires_in = state.auth_config.token_ttl_seconds;
    let ttl = i64::try_from(expires_in)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX);
    let proxied = request.actor.is_some() && request.admin.is_some();

    let admin_token = request
        .admin
        .as_ref()
        .map(|admin| {
            let sid = state.sessions.create_session(Subject::Admin, &admin.user_id, ttl);
            let data = AdminTokenData {
                uid: admin.user_id.clone(),
                sid,
            };
            sign_admin_token(&data, secret, expires_in)
        })
        .transpose()?;

    let actor_token = request
        .actor
        .as_ref()
        .map(|actor| {
            let sid = state.sessions.create_session(Subject::Actor, &actor.user_id, ttl);
            let data = ActorTokenData {
                uid: actor.user_id.clone(),
                sid,
                proxy: proxied.then_some(true),
            };
            sign_actor_token(&data, secret, expires_in)
        })
        .transpose()?;

    let authorization = compose_bearer_header(&NamedTokens {
        actor: actor_token.as_deref(),
        admin: admin_token.as_deref(),
    })
    .ok_or_else(|| ApiError::bad_request("Request at least one of actor or admin"))?;

    tracing::info!(
        actor = ?request.actor.as_ref().map(|a| a.user_id.as_str()),
        admin = ?request.admin.as_ref().map(|a| a.user_id.as_str()),
        proxied,
        "Issued development tokens"
    );

    Ok(Json(IssueTokensResponse {
        actor_token,
        admin_token,
        authorization,
        expires_in,
    }))
}
