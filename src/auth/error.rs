// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::roles::Role;

/// Message returned for every verification failure.
///
/// Missing, malformed, forged and expired tokens all look the same on the
/// wire so callers cannot tell which check failed.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Reasons the gate rejects a request.
///
/// The `Display` output is the internal description (logs, tests). The
/// response body uses [`AuthError::public_message`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer <token>` header
    #[error("bearer credential is missing")]
    MissingCredential,
    /// Token could not be decoded into the expected claims
    #[error("token is malformed")]
    Malformed,
    /// Token signature does not match the configured secret
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Token `exp` is in the past
    #[error("token has expired")]
    Expired,
    /// Verified identity holds a role the route does not permit
    #[error("role {0} is not permitted on this route")]
    Forbidden(Role),
}

#[derive(Serialize)]
struct AuthErrorBody {
    message: String,
}

impl AuthError {
    /// Stable code for structured logs. Never sent to clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::Malformed => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::Forbidden(_) => "forbidden_role",
        }
    }

    /// HTTP status for this error.
    ///
    /// Role mismatches also answer 401, matching the clients this gate was
    /// written for.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    /// Message placed in the response body.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Forbidden(role) => {
                format!("{} can not access this resource", role.display_name())
            }
            _ => INVALID_TOKEN_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            message: self.public_message(),
        });
        (status, body).into_response()
    }
}
