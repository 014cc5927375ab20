//! Request authentication.
//!
//! [`authorize_request`] is installed once over the whole API. For every
//! route not listed in [`AnonymousRoutes`] it:
//!
//! 1. reads the token from the `Authorization` header,
//! 2. validates it with the [`TokenService`],
//! 3. confirms the subject is an active user in the store of the token's
//!    role,
//! 4. attaches an [`AuthContext`] to the request.
//!
//! Any failure answers 401 and the handler never runs.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sweetmanager_auth::{Role, TokenClaim, TokenError, TokenService};
use tracing::{debug, error};

use crate::middleware::anonymous::AnonymousRoutes;
use crate::modules::users::directory::UserDirectory;

/// Why a request was turned away by the authorization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Token is required")]
    MissingToken,
    #[error("Token is invalid")]
    InvalidToken,
    /// Verified token naming a role that has no user store.
    #[error("Invalid Token!")]
    UnknownRole(String),
    /// Verified token whose subject is not an active user of its role.
    #[error("Invalid Token!")]
    UnknownPrincipal,
    /// A protected endpoint was reached without an attached context.
    #[error("Unauthorized")]
    MissingCredentials,
    #[error("Forbidden")]
    RoleNotPermitted(Role),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::RoleNotPermitted(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status(), body).into_response()
    }
}

/// The verified claim of the current request.
///
/// Inserted by [`authorize_request`]; handlers take it as an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext(pub TokenClaim);

impl AuthContext {
    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn subject_id(&self) -> i64 {
        self.0.subject_id
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}

/// Resolves an `Authorization` header value to a verified principal.
#[derive(Debug, Clone)]
pub struct Authenticator {
    tokens: Arc<TokenService>,
    users: UserDirectory,
}

impl Authenticator {
    pub fn new(tokens: Arc<TokenService>, users: UserDirectory) -> Self {
        Self { tokens, users }
    }

    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<AuthContext, AuthError> {
        let token = extract_token(authorization).ok_or(AuthError::MissingToken)?;

        let claim = self.tokens.validate(token).map_err(|e| match e {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::UnknownRole(role) => {
                error!(role = %role, "Token validation error: unknown role");
                AuthError::UnknownRole(role)
            }
        })?;

        let store = self.users.for_role(claim.role);
        match store.find_by_id(claim.subject_id).await {
            Ok(Some(_)) => Ok(AuthContext(claim)),
            Ok(None) => {
                error!(
                    role = %claim.role,
                    subject_id = claim.subject_id,
                    "Token validation error: no active user"
                );
                Err(AuthError::UnknownPrincipal)
            }
            Err(e) => {
                error!(
                    role = %claim.role,
                    subject_id = claim.subject_id,
                    error = %e.error,
                    "Token validation error: user lookup failed"
                );
                Err(AuthError::UnknownPrincipal)
            }
        }
    }
}

/// Last space-separated segment of the header; `Bearer <t>` and a bare
/// `<t>` both yield `<t>`.
fn extract_token(authorization: Option<&str>) -> Option<&str> {
    authorization?
        .split(' ')
        .next_back()
        .filter(|token| !token.is_empty())
}

/// State of the global authorization middleware.
#[derive(Debug, Clone)]
pub struct RequestAuthorization {
    authenticator: Arc<Authenticator>,
    anonymous: AnonymousRoutes,
}

impl RequestAuthorization {
    pub fn new(authenticator: Authenticator, anonymous: AnonymousRoutes) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            anonymous,
        }
    }
}

pub async fn authorize_request(
    State(auth): State<RequestAuthorization>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let anonymous = auth.anonymous.is_anonymous(&req);
    debug!(path = %req.uri().path(), anonymous, "Authorizing request");

    if anonymous {
        return Ok(next.run(req).await);
    }

    // A header that is present but not visible ASCII is a bad token, not a missing one.
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::InvalidToken)?),
        None => None,
    };

    let context = auth.authenticator.authenticate(authorization).await?;

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::model::{NewUser, UpdateUser, User, UserCredentials, UserState};
    use crate::modules::users::repository::UserRepository;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use sweetmanager_auth::claims::JwtClaims;
    use sweetmanager_config::JwtConfig;
    use sweetmanager_core::AppError;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    const TEST_SECRET: &str = "middleware-test-secret-at-least-32-chars";

    fn test_tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(&JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry: 3600,
        }))
    }

    fn user(id: i64, state: UserState) -> NewUser {
        NewUser {
            user: User {
                id,
                username: format!("user{id}"),
                name: "Test".to_string(),
                surname: "User".to_string(),
                email: format!("user{id}@test.com"),
                phone: 111222333,
                state,
                hotel_id: None,
            },
            password_hash: "hash".to_string(),
        }
    }

    async fn directory_with_admin(id: i64) -> UserDirectory {
        let users = UserDirectory::in_memory();
        users
            .for_role(Role::Admin)
            .create(user(id, UserState::Active))
            .await
            .unwrap();
        users
    }

    struct BrokenStore(Role);

    #[async_trait]
    impl UserRepository for BrokenStore {
        fn role(&self) -> Role {
            self.0
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<User>, AppError> {
            Err(AppError::database(anyhow::anyhow!("connection reset")))
        }

        async fn find_credentials(&self, _email: &str) -> Result<Option<UserCredentials>, AppError> {
            unreachable!()
        }

        async fn find_all_by_hotel(&self, _hotel_id: i64) -> Result<Vec<User>, AppError> {
            unreachable!()
        }

        async fn create(&self, _new_user: NewUser) -> Result<User, AppError> {
            unreachable!()
        }

        async fn update(&self, _update: UpdateUser) -> Result<User, AppError> {
            unreachable!()
        }
    }

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for ErrorCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_token(Some("abc.def")), Some("abc.def"));
        assert_eq!(extract_token(Some("Bearer ")), None);
        assert_eq!(extract_token(Some("")), None);
        assert_eq!(extract_token(None), None);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::UnknownPrincipal.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::UnknownRole("ROLE_GUEST".to_string()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::MissingCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::RoleNotPermitted(Role::Worker).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn test_authenticate_missing_header() {
        let authenticator = Authenticator::new(test_tokens(), UserDirectory::in_memory());

        assert_eq!(
            authenticator.authenticate(None).await,
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            authenticator.authenticate(Some("Bearer ")).await,
            Err(AuthError::MissingToken)
        );
    }

    #[tokio::test]
    async fn test_authenticate_bad_token() {
        let authenticator = Authenticator::new(test_tokens(), UserDirectory::in_memory());

        assert_eq!(
            authenticator.authenticate(Some("Bearer nope")).await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_authenticate_resolves_active_user() {
        let tokens = test_tokens();
        let authenticator = Authenticator::new(tokens.clone(), directory_with_admin(4).await);
        let token = tokens.issue(4, Role::Admin).unwrap();

        let context = authenticator
            .authenticate(Some(&format!("Bearer {token}")))
            .await
            .unwrap();

        assert_eq!(context.role(), Role::Admin);
        assert_eq!(context.subject_id(), 4);
    }

    #[tokio::test]
    async fn test_role_selects_store() {
        let tokens = test_tokens();
        let authenticator = Authenticator::new(tokens.clone(), directory_with_admin(4).await);

        // Admin 4 exists; worker 4 does not.
        let token = tokens.issue(4, Role::Worker).unwrap();
        assert_eq!(
            authenticator
                .authenticate(Some(&format!("Bearer {token}")))
                .await,
            Err(AuthError::UnknownPrincipal)
        );
    }

    #[tokio::test]
    async fn test_inactive_user_is_unknown_principal() {
        let tokens = test_tokens();
        let users = UserDirectory::in_memory();
        users
            .for_role(Role::Owner)
            .create(user(8, UserState::Inactive))
            .await
            .unwrap();
        let authenticator = Authenticator::new(tokens.clone(), users);

        let token = tokens.issue(8, Role::Owner).unwrap();
        assert_eq!(
            authenticator
                .authenticate(Some(&format!("Bearer {token}")))
                .await,
            Err(AuthError::UnknownPrincipal)
        );
    }

    #[tokio::test]
    async fn test_store_failure_denies_and_logs() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let tokens = test_tokens();
        let users = UserDirectory::new(
            Arc::new(BrokenStore(Role::Admin)),
            Arc::new(BrokenStore(Role::Worker)),
            Arc::new(BrokenStore(Role::Owner)),
        )
        .unwrap();
        let authenticator = Authenticator::new(tokens.clone(), users);

        let token = tokens.issue(1, Role::Owner).unwrap();
        assert_eq!(
            authenticator
                .authenticate(Some(&format!("Bearer {token}")))
                .await,
            Err(AuthError::UnknownPrincipal)
        );
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_only_principal_failures_log_errors() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let tokens = test_tokens();
        let authenticator = Authenticator::new(tokens.clone(), directory_with_admin(1).await);

        let _ = authenticator.authenticate(None).await;
        let _ = authenticator.authenticate(Some("Bearer garbage")).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        let token = tokens.issue(99, Role::Admin).unwrap();
        let _ = authenticator
            .authenticate(Some(&format!("Bearer {token}")))
            .await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signed_unknown_role_logs_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let authenticator = Authenticator::new(test_tokens(), directory_with_admin(1).await);

        let now = chrono::Utc::now().timestamp() as usize;
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &JwtClaims {
                sub: "1".to_string(),
                role: "ROLE_GUEST".to_string(),
                exp: now + 600,
                iat: now,
            },
            &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            authenticator
                .authenticate(Some(&format!("Bearer {token}")))
                .await,
            Err(AuthError::UnknownRole("ROLE_GUEST".to_string()))
        );
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_context_extractor_requires_attachment() {
        let req = axum::http::Request::builder()
            .uri("/")
            .body(axum::body::Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        assert_eq!(
            AuthContext::from_request_parts(&mut parts, &()).await,
            Err(AuthError::MissingCredentials)
        );
    }
}
