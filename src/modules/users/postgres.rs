//! Postgres-backed user store.
//!
//! Each role lives in its own table (`admins`, `workers`, `owners`) with an
//! identical layout; see `migrations/`.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use sweetmanager_auth::Role;
use sweetmanager_core::AppError;
use tracing::instrument;

use super::model::{NewUser, UpdateUser, User, UserCredentials};
use super::repository::{UserRepository, user_exists, user_not_found};

const COLUMNS: &str = "id, username, name, surname, email, phone, state, hotel_id, password_hash";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    surname: String,
    email: String,
    phone: i64,
    state: String,
    hotel_id: Option<i64>,
    password_hash: String,
}

impl TryFrom<UserRow> for UserCredentials {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let state = row
            .state
            .parse()
            .map_err(|_| AppError::internal(anyhow::anyhow!("Corrupt state for user {}", row.id)))?;

        Ok(UserCredentials {
            user: User {
                id: row.id,
                username: row.username,
                name: row.name,
                surname: row.surname,
                email: row.email,
                phone: row.phone,
                state,
                hotel_id: row.hotel_id,
            },
            password_hash: row.password_hash,
        })
    }
}

fn into_user(row: UserRow) -> Result<User, AppError> {
    UserCredentials::try_from(row).map(|credentials| credentials.user)
}

fn map_write_error(err: sqlx::Error, context: &'static str) -> AppError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => user_exists(),
        other => AppError::database(anyhow::Error::new(other).context(context)),
    }
}

pub struct PgUserRepository {
    pool: PgPool,
    role: Role,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, role: Role) -> Self {
        Self { pool, role }
    }

    fn table(&self) -> &'static str {
        match self.role {
            Role::Admin => "admins",
            Role::Worker => "workers",
            Role::Owner => "owners",
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    fn role(&self) -> Role {
        self.role
    }

    #[instrument(skip(self), fields(table = self.table()))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1 AND state = 'ACTIVE'",
            self.table()
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by ID")
            .map_err(AppError::database)?
            .map(into_user)
            .transpose()
    }

    #[instrument(skip(self), fields(table = self.table()))]
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE email = $1", self.table());

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by email")
            .map_err(AppError::database)?
            .map(UserCredentials::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(table = self.table()))]
    async fn find_all_by_hotel(&self, hotel_id: i64) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE hotel_id = $1 ORDER BY id",
            self.table()
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(hotel_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch users by hotel")
            .map_err(AppError::database)?
            .into_iter()
            .map(into_user)
            .collect()
    }

    #[instrument(skip(self, new_user), fields(table = self.table(), id = new_user.user.id))]
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO {} ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {COLUMNS}",
            self.table()
        );
        let user = new_user.user;

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.surname)
            .bind(&user.email)
            .bind(user.phone)
            .bind(user.state.as_str())
            .bind(user.hotel_id)
            .bind(&new_user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to insert user"))?;

        into_user(row)
    }

    #[instrument(skip(self, update), fields(table = self.table(), id = update.user.id))]
    async fn update(&self, update: UpdateUser) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE {} SET username = $2, name = $3, surname = $4, email = $5, phone = $6, \
             state = $7, hotel_id = $8 WHERE id = $1 RETURNING {COLUMNS}",
            self.table()
        );
        let user = update.user;

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.surname)
            .bind(&user.email)
            .bind(user.phone)
            .bind(user.state.as_str())
            .bind(user.hotel_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to update user"))?
            .ok_or_else(|| user_not_found(self.role, user.id))?;

        into_user(row)
    }
}
