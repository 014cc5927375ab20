//! In-memory user store for tests and local runs without Postgres.
//!
//! Mirrors the Postgres store's contract: `find_by_id` only sees active
//! users, ids and emails are unique per store. State is lost on drop.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sweetmanager_auth::Role;
use sweetmanager_core::AppError;
use tokio::sync::RwLock;

use super::model::{NewUser, UpdateUser, User, UserCredentials};
use super::repository::{UserRepository, user_exists, user_not_found};

#[derive(Debug)]
pub struct InMemoryUserRepository {
    role: Role,
    users: RwLock<BTreeMap<i64, UserCredentials>>,
}

impl InMemoryUserRepository {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            users: RwLock::new(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    fn role(&self) -> Role {
        self.role
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .get(&id)
            .map(|stored| stored.user.clone())
            .filter(User::is_active))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|stored| stored.user.email == email)
            .cloned())
    }

    async fn find_all_by_hotel(&self, hotel_id: i64) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|stored| stored.user.hotel_id == Some(hotel_id))
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        let taken = users.contains_key(&new_user.user.id)
            || users
                .values()
                .any(|stored| stored.user.email == new_user.user.email);
        if taken {
            return Err(user_exists());
        }

        let user = new_user.user.clone();
        users.insert(
            user.id,
            UserCredentials {
                user: new_user.user,
                password_hash: new_user.password_hash,
            },
        );
        Ok(user)
    }

    async fn update(&self, update: UpdateUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        let id = update.user.id;

        let email_taken = users
            .values()
            .any(|stored| stored.user.id != id && stored.user.email == update.user.email);
        if email_taken {
            return Err(user_exists());
        }

        let stored = users
            .get_mut(&id)
            .ok_or_else(|| user_not_found(self.role, id))?;
        stored.user = update.user;
        Ok(stored.user.clone())
    }
}
