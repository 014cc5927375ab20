//! User data models and DTOs.
//!
//! Admins, workers and owners share one shape; which store a record lives
//! in is decided by its [`Role`](sweetmanager_auth::Role), never by a field
//! of the record itself.
//!
//! # Core Types
//!
//! - [`User`] - a user as returned by the API
//! - [`UserState`] - active / inactive value object
//! - [`NewUser`], [`UpdateUser`] - normalized write models handed to a store
//! - [`UserCredentials`] - a user together with its password hash
//!
//! # Request DTOs
//!
//! - [`UpdateUserDto`] - body of the `update-*` endpoints
//! - [`HotelQuery`], [`IdQuery`] - query strings of the read endpoints

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sweetmanager_core::AppError;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Whether a user may authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserState {
    Active,
    Inactive,
}

impl UserState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserState::Active => "ACTIVE",
            UserState::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(UserState::Active),
            "INACTIVE" => Ok(UserState::Inactive),
            other => Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid user state: {}",
                other
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: i64,
    pub state: UserState,
    pub hotel_id: Option<i64>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.state == UserState::Active
    }
}

#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Insert model. Build it through [`NewUser::new`] so casing is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user: User,
    pub password_hash: String,
}

/// Profile fields of an existing user; the password is not touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUser {
    pub user: User,
}

/// Raw profile fields as they arrive from a request.
#[derive(Debug, Clone)]
pub struct UserFields {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: i64,
    pub state: String,
    pub hotel_id: Option<i64>,
}

impl UserFields {
    fn into_user(self) -> Result<User, AppError> {
        Ok(User {
            id: self.id,
            username: self.username.trim().to_string(),
            name: capitalize(&self.name),
            surname: capitalize(&self.surname),
            email: normalize_email(&self.email),
            phone: self.phone,
            state: self.state.parse()?,
            hotel_id: self.hotel_id,
        })
    }
}

impl NewUser {
    pub fn new(fields: UserFields, password_hash: String) -> Result<Self, AppError> {
        Ok(Self {
            user: fields.into_user()?,
            password_hash,
        })
    }
}

impl UpdateUser {
    pub fn new(fields: UserFields) -> Result<Self, AppError> {
        Ok(Self {
            user: fields.into_user()?,
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn capitalize(value: &str) -> String {
    let trimmed = value.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    pub id: i64,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub surname: String,
    #[validate(email)]
    pub email: String,
    pub phone: i64,
    #[validate(length(min = 1))]
    pub state: String,
    pub hotel_id: Option<i64>,
}

impl From<UpdateUserDto> for UserFields {
    fn from(dto: UpdateUserDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            name: dto.name,
            surname: dto.surname,
            email: dto.email,
            phone: dto.phone,
            state: dto.state,
            hotel_id: dto.hotel_id,
        }
    }
}

#[derive(Deserialize, Debug, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    pub id: i64,
}

#[derive(Deserialize, Debug, Clone, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HotelQuery {
    pub hotel_id: i64,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
