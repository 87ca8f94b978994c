// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{role_auth, Identity, Role, RolePolicy},
    error::ApiError,
    state::AppState,
};

pub mod admin;
pub mod health;
pub mod users;

/// Build the application router.
///
/// Each gated router carries its own [`RolePolicy`]; all of them share the
/// verifier held in `state`.
pub fn router(state: AppState) -> Router {
    let users_policy =
        RolePolicy::new(users::PERMITTED_ROLES).with_public_routes(users::PUBLIC_ROUTES);
    let users_routes = Router::new()
        .route("/me", get(users::me))
        .route("/roles", get(users::roles))
        .route_layer(from_fn_with_state(state.gate(users_policy), role_auth));

    let admin_policy = RolePolicy::new(admin::PERMITTED_ROLES);
    let admin_routes = Router::new()
        .route("/overview", get(admin::overview))
        .route_layer(from_fn_with_state(state.gate(admin_policy), role_auth));

    let v1_routes = Router::new()
        .nest("/users", users_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::me,
        users::roles,
        admin::overview
    ),
    components(
        schemas(
            Identity,
            Role,
            health::HealthResponse,
            users::RolesResponse,
            admin::OverviewResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "Endpoints for any signed-in user"),
        (name = "Admin", description = "Administrator endpoints")
    )
)]
struct ApiDoc;
