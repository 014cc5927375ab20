use std::sync::Arc;

use anyhow::Context;
use sweetmanager_auth::TokenService;
use sweetmanager_config::{CorsConfig, JwtConfig};
use sweetmanager_db::init_db_pool;

use crate::middleware::auth::Authenticator;
use crate::modules::users::directory::UserDirectory;

#[derive(Clone, Debug)]
pub struct AppState {
    pub users: UserDirectory,
    pub tokens: Arc<TokenService>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(users: UserDirectory, jwt_config: &JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            users,
            tokens: Arc::new(TokenService::new(jwt_config)),
            cors_config,
        }
    }

    /// Authenticator sharing this state's token service and user stores.
    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.tokens.clone(), self.users.clone())
    }
}

/// Connects to Postgres, applies pending migrations and loads config.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let pool = init_db_pool()
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(AppState::new(
        UserDirectory::postgres(pool),
        &JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
