use std::env;

/// Signing secret and lifetime of the bearer tokens issued at sign-in.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds a freshly issued token stays valid.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
        }
    }
}
