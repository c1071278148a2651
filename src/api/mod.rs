// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::authoriser_middleware,
    config::AuthMode,
    models::{
        IssueTokensRequest, IssueTokensResponse, PrincipalRequest, PrincipalResponse,
        WhoAmIResponse,
    },
    state::AppState,
};

pub mod dev;
pub mod health;
pub mod identity;

pub fn router(state: AppState) -> Router {
    let mut v1_routes = Router::<AppState>::new()
        .route("/whoami", get(identity::whoami))
        .route("/actor/me", get(identity::actor_me))
        .route("/admin/me", get(identity::admin_me));

    // Token minting is never mounted next to the authoriser.
    match state.auth_config.mode {
        AuthMode::Local => {
            v1_routes = v1_routes.route("/dev/tokens", post(dev::issue_tokens));
        }
        AuthMode::Authoriser => {
            v1_routes = v1_routes.layer(middleware::from_fn_with_state(
                state.clone(),
                authoriser_middleware,
            ));
        }
    }

    let health_routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        identity::whoami,
        identity::actor_me,
        identity::admin_me,
        dev::issue_tokens,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            PrincipalResponse,
            WhoAmIResponse,
            PrincipalRequest,
            IssueTokensRequest,
            IssueTokensResponse,
            health::HealthResponse,
            health::ReadyResponse
        )
    ),
    tags(
        (name = "Identity", description = "Authenticated principal lookup"),
        (name = "Development", description = "Development token issuance"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
