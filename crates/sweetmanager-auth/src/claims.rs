//! Token payloads.
//!
//! [`JwtClaims`] is the signed wire form; [`TokenClaim`] is what survives
//! validation and travels with the request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Claims as embedded in the signed token.
///
/// `role` stays a plain string here so a well-signed token carrying a
/// foreign role literal can be told apart from a forged or expired one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id within the store selected by `role`
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Verified payload of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaim {
    pub subject_id: i64,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_claims_serialize() {
        let claims = JwtClaims {
            sub: "12".to_string(),
            role: Role::Admin.to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"12""#));
        assert!(serialized.contains(r#""role":"ROLE_ADMIN""#));
    }

    #[test]
    fn test_jwt_claims_deserialize_keeps_foreign_role() {
        let json = r#"{"sub":"3","role":"ROLE_GUEST","exp":9999999999,"iat":9999999900}"#;
        let claims: JwtClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.role, "ROLE_GUEST");
        assert_eq!(claims.exp, 9999999999);
    }
}
