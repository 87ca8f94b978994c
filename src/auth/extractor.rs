// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer credential parsing and the Axum extractor for the gate's identity.
//!
//! Handlers behind [`role_auth`](super::role_auth) read the caller with:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is the verified Identity
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{AuthError, Identity};

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the bare token out of `Authorization: Bearer <token>`.
///
/// Absent headers, non-ASCII values, other schemes and empty tokens are all
/// `MissingCredential`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MissingCredential)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MissingCredential)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    Ok(token)
}

/// Identity attached by the gate.
///
/// Rejects with `MissingCredential` when no identity is present, which
/// happens on public paths or on routers without a gate.
pub struct Auth(pub Identity);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use axum::http::{HeaderValue, Request};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn sample_identity() -> Identity {
        Identity {
            subject: "user_from_gate".to_string(),
            role: Role::User,
            issued_at: None,
            expires_at: 0,
            name: None,
            email: None,
        }
    }

    #[test]
    fn extract_bearer_returns_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn extract_bearer_requires_header() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(AuthError::MissingCredential)
        );
    }

    #[test]
    fn extract_bearer_rejects_other_schemes() {
        for value in ["Basic dXNlcjpwYXNz", "abc.def.ghi", "bearer abc.def.ghi"] {
            assert_eq!(
                extract_bearer(&headers_with(value)),
                Err(AuthError::MissingCredential),
                "{value}"
            );
        }
    }

    #[test]
    fn extract_bearer_rejects_empty_token() {
        assert_eq!(
            extract_bearer(&headers_with("Bearer    ")),
            Err(AuthError::MissingCredential)
        );
    }

    #[tokio::test]
    async fn auth_reads_identity_from_extensions() {
        let mut parts = Request::builder().uri("/me").body(()).unwrap().into_parts().0;
        parts.extensions.insert(sample_identity());

        let Auth(identity) = Auth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(identity.subject, "user_from_gate");
    }

    #[tokio::test]
    async fn auth_without_identity_is_rejected() {
        let mut parts = Request::builder().uri("/me").body(()).unwrap().into_parts().0;
        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }
}
