// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role Gate Server - bearer token authentication and role authorization
//!
//! Verifies signed access tokens against a server-held secret and enforces a
//! per-router set of permitted roles before requests reach handlers.
//!
//! ## Modules
//!
//! - `api` - HTTP routes (Axum) wired through the gate
//! - `auth` - Credential extraction, token verification, role policy, gate
//! - `config` - Environment configuration
//! - `logging` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
