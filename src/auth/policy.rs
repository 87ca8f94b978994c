// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-route role policy.

use std::collections::HashSet;

use super::{AuthError, Identity, Role};

/// Roles permitted on a route plus the paths that skip the gate entirely.
///
/// ```rust,ignore
/// let policy = RolePolicy::new([Role::Admin, Role::User])
///     .with_public_routes(["/auth/login"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePolicy {
    allowed: HashSet<Role>,
    public_routes: HashSet<String>,
}

impl RolePolicy {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: roles.into_iter().collect(),
            public_routes: HashSet::new(),
        }
    }

    /// Exempt exact paths from authentication.
    pub fn with_public_routes<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.public_routes.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Exact match; `/auth/login/` is not `/auth/login`.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_routes.contains(path)
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Allow the identity if its role is permitted, else `Forbidden(role)`.
    pub fn check(&self, identity: &Identity) -> Result<(), AuthError> {
        if self.permits(identity.role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(identity.role))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            subject: "user_1".to_string(),
            role,
            issued_at: None,
            expires_at: 0,
            name: None,
            email: None,
        }
    }

    #[test]
    fn check_allows_member_roles() {
        let policy = RolePolicy::new([Role::User, Role::Admin]);
        assert_eq!(policy.check(&identity(Role::User)), Ok(()));
        assert_eq!(policy.check(&identity(Role::Admin)), Ok(()));
    }

    #[test]
    fn check_names_the_rejected_role() {
        let policy = RolePolicy::new([Role::Admin]);
        let err = policy.check(&identity(Role::User)).unwrap_err();
        assert_eq!(err, AuthError::Forbidden(Role::User));
        assert_eq!(err.public_message(), "User can not access this resource");
    }

    #[test]
    fn empty_policy_rejects_everyone() {
        let policy = RolePolicy::default();
        for role in Role::ALL {
            assert!(policy.check(&identity(role)).is_err());
        }
    }

    #[test]
    fn public_routes_match_exactly() {
        let policy = RolePolicy::new([Role::Admin]).with_public_routes(["/auth/login", "/roles"]);
        assert!(policy.is_public("/auth/login"));
        assert!(policy.is_public("/roles"));
        assert!(!policy.is_public("/auth/login/"));
        assert!(!policy.is_public("/auth"));
    }
}
