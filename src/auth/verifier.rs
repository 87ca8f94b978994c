// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token verification.
//!
//! ## Security
//!
//! - Only the HMAC family (HS256/HS384/HS512) is accepted; a token announcing
//!   any other algorithm is rejected as malformed
//! - `exp` is mandatory and checked with zero clock leeway; a future `nbf`
//!   is rejected
//! - Signature and time claims are checked before the claim shape, so an
//!   expired token is reported as expired whatever else it carries
//! - The decoding key is built once at startup and shared read-only
//! - Tokens are never logged

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use super::{claims::AccessClaims, AuthError, Identity};
use crate::config::ConfigError;

/// HMAC algorithms accepted for access tokens.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Verifies access tokens against the server secret.
///
/// Immutable after construction. Wrap in `Arc` to share across routers;
/// rotating the secret requires a restart.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Build a verifier for the given shared secret.
    ///
    /// An empty secret would accept tokens signed by anyone who guesses it,
    /// so it is a configuration error.
    pub fn from_secret(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Verify the signature and time claims of `token` and decode its
    /// identity.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        // Untyped first: the typed decode must not shadow Expired.
        let data = decode::<serde_json::Value>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::ImmatureSignature => AuthError::Malformed,
                _ => AuthError::Malformed,
            }
        })?;

        let claims: AccessClaims =
            serde_json::from_value(data.claims).map_err(|_| AuthError::Malformed)?;
        Identity::from_claims(claims)
    }
}
