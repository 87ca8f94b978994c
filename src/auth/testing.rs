// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token fixtures for tests.

use jsonwebtoken::{encode, EncodingKey, Header};

use super::{claims::AccessClaims, Role};

pub const TEST_SECRET: &[u8] = b"test-access-secret";

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Claims for `subject` expiring `ttl_secs` from now (negative for the past).
pub fn claims_for(subject: &str, role: Role, ttl_secs: i64) -> AccessClaims {
    let now = now();
    AccessClaims {
        sub: Some(subject.to_string()),
        account_id: None,
        role,
        iat: Some(now - 10),
        exp: now + ttl_secs,
        name: None,
        email: None,
    }
}

pub fn mint_with(header: &Header, claims: &AccessClaims, secret: &[u8]) -> String {
    encode(header, claims, &EncodingKey::from_secret(secret)).expect("failed to mint test token")
}

/// HS256 token signed with [`TEST_SECRET`].
pub fn mint(claims: &AccessClaims) -> String {
    mint_with(&Header::default(), claims, TEST_SECRET)
}

/// Valid one-hour token for `role`.
pub fn token_for(subject: &str, role: Role) -> String {
    mint(&claims_for(subject, role, 3600))
}
