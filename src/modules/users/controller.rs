use axum::{
    Json,
    extract::{Query, State},
};
use sweetmanager_auth::Role;
use sweetmanager_core::AppError;
use tracing::{info, instrument};

use crate::middleware::auth::AuthContext;
use crate::modules::authentication::controller::ErrorResponse;
use crate::modules::users::model::{
    CountResponse, HotelQuery, IdQuery, MessageResponse, UpdateUserDto, User,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

const USER_UPDATED: &str = "User updated correctly!";

/// Get an active owner by id
#[utoipa::path(
    get,
    path = "/api/v1/user/get-owner-id",
    params(IdQuery),
    responses(
        (status = 200, description = "Owner found", body = User),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_owner_by_id(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<User>, AppError> {
    let owner = UserService::get_by_id(&state.users, Role::Owner, query.id).await?;
    Ok(Json(owner))
}

/// List the admins of a hotel
#[utoipa::path(
    get,
    path = "/api/v1/user/get-all-admins",
    params(HotelQuery),
    responses(
        (status = 200, description = "Admins of the hotel", body = Vec<User>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_all_admins(
    State(state): State<AppState>,
    Query(query): Query<HotelQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let admins = UserService::list_by_hotel(&state.users, Role::Admin, query.hotel_id).await?;
    Ok(Json(admins))
}

/// List the workers of a hotel
#[utoipa::path(
    get,
    path = "/api/v1/user/get-all-workers",
    params(HotelQuery),
    responses(
        (status = 200, description = "Workers of the hotel", body = Vec<User>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_all_workers(
    State(state): State<AppState>,
    Query(query): Query<HotelQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let workers = UserService::list_by_hotel(&state.users, Role::Worker, query.hotel_id).await?;
    Ok(Json(workers))
}

/// Count the admins of a hotel
#[utoipa::path(
    get,
    path = "/api/v1/user/get-admin-count",
    params(HotelQuery),
    responses(
        (status = 200, description = "Number of admins in the hotel", body = CountResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_admin_count(
    State(state): State<AppState>,
    Query(query): Query<HotelQuery>,
) -> Result<Json<CountResponse>, AppError> {
    let count = UserService::count_by_hotel(&state.users, Role::Admin, query.hotel_id).await?;
    Ok(Json(CountResponse { count }))
}

/// Count the workers of a hotel
#[utoipa::path(
    get,
    path = "/api/v1/user/get-worker-count",
    params(HotelQuery),
    responses(
        (status = 200, description = "Number of workers in the hotel", body = CountResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_worker_count(
    State(state): State<AppState>,
    Query(query): Query<HotelQuery>,
) -> Result<Json<CountResponse>, AppError> {
    let count = UserService::count_by_hotel(&state.users, Role::Worker, query.hotel_id).await?;
    Ok(Json(CountResponse { count }))
}

async fn update_user(
    state: &AppState,
    auth: &AuthContext,
    role: Role,
    dto: UpdateUserDto,
) -> Result<Json<MessageResponse>, AppError> {
    let user = UserService::update(&state.users, role, dto).await?;
    info!(
        updated_id = user.id,
        updated_role = %role,
        by_id = auth.subject_id(),
        by_role = %auth.role(),
        "User updated"
    );

    Ok(Json(MessageResponse {
        message: USER_UPDATED.to_string(),
    }))
}

/// Update an admin's profile
#[utoipa::path(
    put,
    path = "/api/v1/user/update-admin",
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Admin updated", body = MessageResponse),
        (status = 400, description = "Bad request - email already taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth, dto), fields(id = dto.id))]
pub async fn update_admin(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<MessageResponse>, AppError> {
    update_user(&state, &auth, Role::Admin, dto).await
}

/// Update a worker's profile
#[utoipa::path(
    put,
    path = "/api/v1/user/update-worker",
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Worker updated", body = MessageResponse),
        (status = 400, description = "Bad request - email already taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Worker not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth, dto), fields(id = dto.id))]
pub async fn update_worker(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<MessageResponse>, AppError> {
    update_user(&state, &auth, Role::Worker, dto).await
}

/// Update an owner's profile
#[utoipa::path(
    put,
    path = "/api/v1/user/update-owner",
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Owner updated", body = MessageResponse),
        (status = 400, description = "Bad request - email already taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth, dto), fields(id = dto.id))]
pub async fn update_owner(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<MessageResponse>, AppError> {
    update_user(&state, &auth, Role::Owner, dto).await
}
