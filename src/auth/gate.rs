// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gate orchestration: public bypass, credential extraction, verification,
//! role check. The first failing step decides the outcome.

use std::sync::Arc;

use axum::http::HeaderMap;

use super::{extract_bearer, AuthError, Identity, RolePolicy, TokenVerifier};

/// Outcome of running a request through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is public. No identity is attached and none may be assumed.
    Bypass,
    /// Token verified and role permitted.
    Allow(Identity),
    /// Request must not reach the handler.
    Deny(AuthError),
}

/// Authorization gate for one router: a shared verifier plus that router's
/// role policy.
#[derive(Debug, Clone)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
    policy: Arc<RolePolicy>,
}

impl AuthGate {
    pub fn new(verifier: Arc<TokenVerifier>, policy: RolePolicy) -> Self {
        Self {
            verifier,
            policy: Arc::new(policy),
        }
    }

    /// Decide whether a request for `path` carrying `headers` may proceed.
    pub fn evaluate(&self, path: &str, headers: &HeaderMap) -> GateDecision {
        if self.policy.is_public(path) {
            tracing::debug!(path, "public route, skipping authentication");
            return GateDecision::Bypass;
        }

        match self.authenticate(headers) {
            Ok(identity) => {
                tracing::debug!(
                    path,
                    subject = %identity.subject,
                    role = %identity.role,
                    "request authorized"
                );
                GateDecision::Allow(identity)
            }
            Err(err) => {
                tracing::debug!(path, reason = err.error_code(), "request denied");
                GateDecision::Deny(err)
            }
        }
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let token = extract_bearer(headers)?;
        let identity = self.verifier.verify(token)?;
        self.policy.check(&identity)?;
        Ok(identity)
    }
}
