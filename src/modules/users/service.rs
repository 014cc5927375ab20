use sweetmanager_auth::Role;
use sweetmanager_core::AppError;

use super::directory::UserDirectory;
use super::model::{UpdateUser, UpdateUserDto, User};
use super::repository::user_not_found;

pub struct UserService;

impl UserService {
    /// Active user `id` of `role`, or 404.
    pub async fn get_by_id(users: &UserDirectory, role: Role, id: i64) -> Result<User, AppError> {
        users
            .for_role(role)
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(role, id))
    }

    pub async fn list_by_hotel(
        users: &UserDirectory,
        role: Role,
        hotel_id: i64,
    ) -> Result<Vec<User>, AppError> {
        users.for_role(role).find_all_by_hotel(hotel_id).await
    }

    pub async fn count_by_hotel(
        users: &UserDirectory,
        role: Role,
        hotel_id: i64,
    ) -> Result<usize, AppError> {
        Ok(Self::list_by_hotel(users, role, hotel_id).await?.len())
    }

    pub async fn update(
        users: &UserDirectory,
        role: Role,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let update = UpdateUser::new(dto.into())?;
        users.for_role(role).update(update).await
    }
}
