//! Issuing and validating bearer tokens.
//!
//! Tokens are HS256 JWTs signed with the secret from [`JwtConfig`]. The key
//! material is derived once when the service is built and is read-only
//! afterwards, so one [`TokenService`] is shared by every request.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use sweetmanager_config::JwtConfig;
use sweetmanager_core::AppError;

use crate::claims::{JwtClaims, TokenClaim};
use crate::role::Role;

/// Why a token was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Malformed, wrongly signed, expired, or carrying a non-numeric subject.
    #[error("token is invalid")]
    Invalid,
    /// Verified token whose role literal is not one of the known roles.
    #[error("token carries unknown role {0:?}")]
    UnknownRole(String),
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: i64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(jwt_config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_config.secret.as_bytes()),
            validation: Validation::default(),
            access_token_expiry: jwt_config.access_token_expiry,
        }
    }

    /// Signs a token for `subject_id` in the store of `role`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails.
    pub fn issue(&self, subject_id: i64, role: Role) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let out_of_range = |_: std::num::TryFromIntError| {
            AppError::internal(anyhow::anyhow!("Token timestamp out of range"))
        };
        let claims = JwtClaims {
            sub: subject_id.to_string(),
            role: role.to_string(),
            exp: usize::try_from(now + self.access_token_expiry).map_err(out_of_range)?,
            iat: usize::try_from(now).map_err(out_of_range)?,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
    }

    /// Verifies signature and expiry and extracts the claim.
    ///
    /// Never panics; every rejection is a [`TokenError`] value so callers
    /// can branch on it directly.
    pub fn validate(&self, token: &str) -> Result<TokenClaim, TokenError> {
        let claims = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)?;

        let subject_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::Invalid)?;

        let expires_at = i64::try_from(claims.exp)
            .ok()
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
            .ok_or(TokenError::Invalid)?;

        let role = claims
            .role
            .parse::<Role>()
            .map_err(|unknown| TokenError::UnknownRole(unknown.0))?;

        Ok(TokenClaim {
            subject_id,
            role,
            expires_at,
        })
    }
}
