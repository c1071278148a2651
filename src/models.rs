// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{ActorInspector, AdminInspector};

/// Identity of one authenticated principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrincipalResponse {
    /// User ID (`uid` claim)
    pub user_id: String,
    /// Session ID (`sid` claim)
    pub session_id: String,
    /// Whether an admin is acting as this actor (actors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Token expiry (Unix timestamp)
    pub expires_at: i64,
}

impl From<&ActorInspector> for PrincipalResponse {
    fn from(actor: &ActorInspector) -> Self {
        Self {
            user_id: actor.user_id().to_string(),
            session_id: actor.session_id().to_string(),
            proxied: Some(actor.is_proxied()),
            expires_at: actor.claims().exp,
        }
    }
}

impl From<&AdminInspector> for PrincipalResponse {
    fn from(admin: &AdminInspector) -> Self {
        Self {
            user_id: admin.user_id().to_string(),
            session_id: admin.session_id().to_string(),
            proxied: None,
            expires_at: admin.claims().exp,
        }
    }
}

/// Every principal on the current request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WhoAmIResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<PrincipalResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<PrincipalResponse>,
}

/// Principal to open a development session for.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrincipalRequest {
    pub user_id: String,
}

/// Request to issue development tokens.
///
/// Supplying both principals issues a proxied actor token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct IssueTokensRequest {
    #[serde(default)]
    pub actor: Option<PrincipalRequest>,
    #[serde(default)]
    pub admin: Option<PrincipalRequest>,
}

/// Issued tokens and the `Authorization` header carrying them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueTokensResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
    /// Ready-to-send `Authorization` header value
    pub authorization: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}
