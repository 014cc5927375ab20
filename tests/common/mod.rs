#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use sweetmanager::modules::users::directory::UserDirectory;
use sweetmanager::modules::users::model::{NewUser, User, UserState};
use sweetmanager::router::init_router;
use sweetmanager::state::AppState;
use sweetmanager_auth::Role;
use sweetmanager_config::{CorsConfig, JwtConfig};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const PASSWORD: &str = "Password123!";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: JWT_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_state() -> AppState {
    AppState::new(
        UserDirectory::in_memory(),
        &jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:4200".to_string()],
        },
    )
}

pub fn test_app(state: &AppState) -> Router {
    init_router(state.clone())
}

/// Seeds a user with password [`PASSWORD`], hashed at a low bcrypt cost.
pub async fn seed_user(
    state: &AppState,
    role: Role,
    id: i64,
    email: &str,
    user_state: UserState,
    hotel_id: Option<i64>,
) -> User {
    let new_user = NewUser {
        user: User {
            id,
            username: format!("user{id}"),
            name: "Test".to_string(),
            surname: "User".to_string(),
            email: email.to_string(),
            phone: 987654321,
            state: user_state,
            hotel_id,
        },
        password_hash: bcrypt::hash(PASSWORD, 4).unwrap(),
    };
    state.users.for_role(role).create(new_user).await.unwrap()
}

pub fn token_for(state: &AppState, id: i64, role: Role) -> String {
    state.tokens.issue(id, role).unwrap()
}

/// Signs arbitrary claims with the test secret.
pub fn forge_token(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn far_future() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

/// Sends a prebuilt request and decodes the JSON body.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
