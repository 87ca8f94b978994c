// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token claims and the identity decoded from them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{error::AuthError, roles::Role};

/// Claims carried by an access token.
///
/// Tokens minted by the user service put the account id in `_id`; standard
/// issuers use `sub`. Either is accepted, `sub` wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (account id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Account id as issued by the user service
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Role claim. Unknown values fail deserialization.
    pub role: Role,

    /// Issued at (Unix seconds)
    #[serde(
        default,
        deserialize_with = "numeric_date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<i64>,

    /// Expiration (Unix seconds)
    #[serde(deserialize_with = "numeric_date::required")]
    pub exp: i64,

    /// Display name set by the issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email set by the issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// JWT NumericDate: integer or fractional seconds, truncated to whole seconds.
mod numeric_date {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Whole(i64),
        Fractional(f64),
    }

    fn to_whole<E: Error>(value: Seconds) -> Result<i64, E> {
        match value {
            Seconds::Whole(secs) => Ok(secs),
            Seconds::Fractional(secs) if secs.is_finite() && secs.abs() < i64::MAX as f64 => {
                Ok(secs.trunc() as i64)
            }
            Seconds::Fractional(secs) => Err(E::custom(format!("timestamp out of range: {secs}"))),
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        to_whole(Seconds::deserialize(deserializer)?)
    }

    pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Option::<Seconds>::deserialize(deserializer)?
            .map(to_whole)
            .transpose()
    }
}

/// Verified caller identity.
///
/// Attached to request extensions by the gate and read by handlers through
/// the [`Auth`](super::Auth) extractor. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Identity {
    /// Canonical account id
    pub subject: String,

    /// Role the token was issued for
    pub role: Role,

    /// Issued-at timestamp (Unix seconds), if the issuer set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,

    /// Expiry timestamp (Unix seconds)
    pub expires_at: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Identity {
    /// Build an identity from verified claims.
    ///
    /// A token without any subject is malformed; an empty subject counts as
    /// missing.
    pub fn from_claims(claims: AccessClaims) -> Result<Self, AuthError> {
        let subject = claims
            .sub
            .or(claims.account_id)
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::Malformed)?;

        Ok(Self {
            subject,
            role: claims.role,
            issued_at: claims.iat,
            expires_at: claims.exp,
            name: claims.name,
            email: claims.email,
        })
    }
}
