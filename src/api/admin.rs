// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only endpoints. Mounted under `/v1/admin` behind a gate that
//! permits `ADMIN` only.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::{Auth, Role},
    state::AppState,
};

pub const PERMITTED_ROLES: [Role; 1] = [Role::Admin];

/// Server overview for administrators.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewResponse {
    /// Subject of the admin making the request.
    pub requested_by: String,
    /// Server uptime in seconds.
    pub uptime_seconds: u64,
    /// Current server time.
    pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/v1/admin/overview",
    tag = "Admin",
    responses(
        (status = 200, description = "Server overview", body = OverviewResponse),
        (status = 401, description = "Missing or invalid token, or role not permitted")
    )
)]
pub async fn overview(
    Auth(identity): Auth,
    State(state): State<AppState>,
) -> Json<OverviewResponse> {
    tracing::info!(subject = %identity.subject, "admin overview requested");

    Json(OverviewResponse {
        requested_by: identity.subject,
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
    })
}
