// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User-facing endpoints. Mounted under `/v1/users` behind a gate that
//! permits `ADMIN` and `USER`, with `/roles` public.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{Auth, Identity, Role};

/// Paths under `/v1/users` reachable without a token.
pub const PUBLIC_ROUTES: [&str; 1] = ["/roles"];

/// Roles a user router accepts.
pub const PERMITTED_ROLES: [Role; 2] = [Role::Admin, Role::User];

#[derive(Debug, Serialize, ToSchema)]
pub struct RolesResponse {
    pub roles: Vec<Role>,
}

/// Identity of the caller as decoded from their token.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Caller identity", body = Identity),
        (status = 401, description = "Missing or invalid token, or role not permitted")
    )
)]
pub async fn me(Auth(identity): Auth) -> Json<Identity> {
    Json(identity)
}

/// Roles known to the service.
#[utoipa::path(
    get,
    path = "/v1/users/roles",
    tag = "Users",
    responses(
        (status = 200, description = "Known roles", body = RolesResponse)
    )
)]
pub async fn roles() -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: Role::ALL.to_vec(),
    })
}
