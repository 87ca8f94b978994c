// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token authentication and role authorization for Axum routers.
//!
//! ## Gate Flow
//!
//! 1. Path in the router's public set → request passes, no identity
//! 2. `Authorization: Bearer <token>` is extracted
//! 3. Token signature and expiry are verified against the server secret
//! 4. Decoded role is checked against the router's permitted roles
//! 5. The [`Identity`] is attached to the request for handlers
//!
//! Any failing step ends the request with 401 and `{"message": ...}`.
//!
//! ## Security
//!
//! - Verification failures share one response message
//! - Roles form a closed set; unknown roles fail decoding
//! - The secret is loaded once at startup and never reloaded

pub mod claims;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod middleware;
pub mod policy;
pub mod roles;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testing;

pub use claims::{AccessClaims, Identity};
pub use error::AuthError;
pub use extractor::{extract_bearer, Auth};
pub use gate::{AuthGate, GateDecision};
pub use middleware::role_auth;
pub use policy::RolePolicy;
pub use roles::Role;
pub use verifier::TokenVerifier;
