use serde::{Deserialize, Serialize};
use sweetmanager_auth::Role;
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::UserFields;

/// Body of the `sign-up-*` endpoints. The client chooses the id.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpUserDto {
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
    #[validate(length(min = 8))]
    pub password: String,
    pub hotel_id: Option<i64>,
}

impl SignUpUserDto {
    /// Splits the body into profile fields and the plain password.
    pub fn into_parts(self) -> (UserFields, String) {
        let fields = UserFields {
            id: self.id,
            username: self.username,
            name: self.name,
            surname: self.surname,
            email: self.email,
            phone: self.phone,
            state: self.state,
            hotel_id: self.hotel_id,
        };
        (fields, self.password)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// 1 = owner, 2 = admin, 3 = worker
    pub roles_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}
