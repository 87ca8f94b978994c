// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum middleware wrapping [`AuthGate`].
//!
//! Layer it on the router whose routes share a role policy:
//!
//! ```rust,ignore
//! let gate = AuthGate::new(
//!     verifier.clone(),
//!     RolePolicy::new([Role::Admin]).with_public_routes(["/auth/login"]),
//! );
//!
//! let admin = Router::new()
//!     .route("/overview", get(overview))
//!     .route_layer(axum::middleware::from_fn_with_state(gate, role_auth));
//! ```
//!
//! Public routes are matched against the path the router sees, so a router
//! nested under `/v1/admin` checks `/overview`, not `/v1/admin/overview`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthGate, GateDecision, Identity};

/// Run the gate; attach the identity on success, answer 401 on failure.
pub async fn role_auth(State(gate): State<AuthGate>, mut request: Request, next: Next) -> Response {
    match gate.evaluate(request.uri().path(), request.headers()) {
        GateDecision::Bypass => {
            request.extensions_mut().remove::<Identity>();
            next.run(request).await
        }
        GateDecision::Allow(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        GateDecision::Deny(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::{claims_for, mint, token_for, TEST_SECRET};
    use crate::auth::{Role, RolePolicy, TokenVerifier};
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Request, StatusCode},
        middleware::{from_fn_with_state, map_request},
        routing::{get, post},
        Json, Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn echo_identity(request: axum::extract::Request) -> Json<serde_json::Value> {
        Json(match request.extensions().get::<Identity>() {
            Some(identity) => serde_json::json!({
                "subject": identity.subject,
                "role": identity.role,
            }),
            None => serde_json::json!({ "anonymous": true }),
        })
    }

    fn app(roles: impl IntoIterator<Item = Role>) -> Router {
        let verifier = Arc::new(TokenVerifier::from_secret(TEST_SECRET).unwrap());
        let gate = AuthGate::new(
            verifier,
            RolePolicy::new(roles).with_public_routes(["/auth/login"]),
        );
        Router::new()
            .route("/auth/login", post(echo_identity))
            .route("/resource", get(echo_identity))
            .route_layer(from_fn_with_state(gate, role_auth))
    }

    /// Stands in for an outer layer that already attached an identity.
    async fn attach_stale_identity(mut request: axum::extract::Request) -> axum::extract::Request {
        request.extensions_mut().insert(Identity {
            subject: "stale_admin".to_string(),
            role: Role::Admin,
            issued_at: None,
            expires_at: 0,
            name: None,
            email: None,
        });
        request
    }

    async fn send(app: Router, method: &str, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn public_route_reaches_handler_without_header() {
        let (status, body) = send(app([Role::Admin]), "POST", "/auth/login", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["anonymous"], true);
    }

    #[tokio::test]
    async fn public_route_never_carries_identity() {
        let token = token_for("admin_1", Role::Admin);
        let (status, body) = send(app([Role::Admin]), "POST", "/auth/login", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["anonymous"], true);
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let (status, body) = send(app([Role::Admin]), "GET", "/resource", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token");
    }

    #[tokio::test]
    async fn expired_token_is_401_with_generic_message() {
        let token = mint(&claims_for("admin_1", Role::Admin, -1));
        let (status, body) = send(app([Role::Admin]), "GET", "/resource", Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token");
    }

    #[tokio::test]
    async fn user_on_admin_route_is_401_with_role_message() {
        let token = token_for("user_1", Role::User);
        let (status, body) = send(app([Role::Admin]), "GET", "/resource", Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "User can not access this resource");
    }

    #[tokio::test]
    async fn permitted_role_reaches_handler_with_identity() {
        let token = token_for("user_1", Role::User);
        let (status, body) =
            send(app([Role::Admin, Role::User]), "GET", "/resource", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subject"], "user_1");
        assert_eq!(body["role"], "USER");
    }

    #[tokio::test]
    async fn public_route_drops_identity_attached_upstream() {
        let app = app([Role::Admin]).layer(map_request(attach_stale_identity));
        let (status, body) = send(app, "POST", "/auth/login", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["anonymous"], true);
    }

    #[tokio::test]
    async fn gated_route_replaces_identity_attached_upstream() {
        let app = app([Role::Admin, Role::User]).layer(map_request(attach_stale_identity));
        let token = token_for("user_1", Role::User);
        let (status, body) = send(app, "GET", "/resource", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subject"], "user_1");
    }
}
