// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{sync::Arc, time::Instant};

use crate::auth::{AuthGate, RolePolicy, TokenVerifier};

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
            started_at: Instant::now(),
        }
    }

    /// Gate sharing this state's verifier with the given policy.
    pub fn gate(&self, policy: RolePolicy) -> AuthGate {
        AuthGate::new(Arc::clone(&self.verifier), policy)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
