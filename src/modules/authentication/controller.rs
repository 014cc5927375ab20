use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use sweetmanager_auth::Role;
use sweetmanager_core::AppError;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{AuthenticatedUserResponse, SignInDto, SignUpUserDto};
use super::service::AuthService;
use crate::modules::users::model::MessageResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

const USER_CREATED: &str = "User created correctly!";

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

async fn sign_up(
    state: &AppState,
    role: Role,
    dto: SignUpUserDto,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    AuthService::sign_up(&state.users, role, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: USER_CREATED.to_string(),
        }),
    ))
}

/// Register a hotel admin
#[utoipa::path(
    post,
    path = "/api/v1/authentication/sign-up-admin",
    request_body = SignUpUserDto,
    responses(
        (status = 201, description = "Admin created", body = MessageResponse),
        (status = 400, description = "Bad request - malformed body or user already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_up_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpUserDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    sign_up(&state, Role::Admin, dto).await
}

/// Register a hotel worker
#[utoipa::path(
    post,
    path = "/api/v1/authentication/sign-up-worker",
    request_body = SignUpUserDto,
    responses(
        (status = 201, description = "Worker created", body = MessageResponse),
        (status = 400, description = "Bad request - malformed body or user already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_up_worker(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpUserDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    sign_up(&state, Role::Worker, dto).await
}

/// Register a hotel owner
#[utoipa::path(
    post,
    path = "/api/v1/authentication/sign-up-owner",
    request_body = SignUpUserDto,
    responses(
        (status = 201, description = "Owner created", body = MessageResponse),
        (status = 400, description = "Bad request - malformed body or user already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_up_owner(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpUserDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    sign_up(&state, Role::Owner, dto).await
}

/// Sign in and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/authentication/sign-in",
    request_body = SignInDto,
    responses(
        (status = 200, description = "Signed in", body = AuthenticatedUserResponse),
        (status = 400, description = "Bad request - unknown rolesId", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInDto>,
) -> Result<Json<AuthenticatedUserResponse>, AppError> {
    let response = AuthService::sign_in(&state.users, &state.tokens, dto).await?;
    Ok(Json(response))
}
