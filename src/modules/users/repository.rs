//! Storage seam for the three role-scoped user stores.

use async_trait::async_trait;
use sweetmanager_auth::Role;
use sweetmanager_core::AppError;

use super::model::{NewUser, UpdateUser, User, UserCredentials};

/// One store of users, bound to a single [`Role`].
///
/// Ids are only unique within a store: admin 1 and worker 1 are unrelated
/// people.
#[async_trait]
pub trait UserRepository: Send + Sync {
    fn role(&self) -> Role;

    /// Returns the user only if it exists and is active.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Returns the user with its password hash regardless of state.
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;

    async fn find_all_by_hotel(&self, hotel_id: i64) -> Result<Vec<User>, AppError>;

    /// Fails with 400 when the id or email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Fails with 404 for an unknown id and 400 when the email is taken.
    async fn update(&self, update: UpdateUser) -> Result<User, AppError>;
}

pub(crate) fn user_exists() -> AppError {
    AppError::bad_request(anyhow::anyhow!("User already exists"))
}

pub(crate) fn user_not_found(role: Role, id: i64) -> AppError {
    AppError::not_found(anyhow::anyhow!("{} with id {} not found", label(role), id))
}

fn label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Worker => "Worker",
        Role::Owner => "Owner",
    }
}
