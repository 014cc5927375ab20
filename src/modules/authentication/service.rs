use sweetmanager_auth::{Role, TokenService};
use sweetmanager_core::{AppError, hash_password, verify_password};
use tracing::{info, instrument};

use crate::modules::users::directory::UserDirectory;
use crate::modules::users::model::{NewUser, User, normalize_email};

use super::model::{AuthenticatedUserResponse, SignInDto, SignUpUserDto};

fn invalid_credentials() -> AppError {
    AppError::unauthorized(anyhow::anyhow!("Invalid email or password"))
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, dto), fields(id = dto.id))]
    pub async fn sign_up(
        users: &UserDirectory,
        role: Role,
        dto: SignUpUserDto,
    ) -> Result<User, AppError> {
        let (fields, password) = dto.into_parts();
        let new_user = NewUser::new(fields, hash_password(&password)?)?;

        let user = users.for_role(role).create(new_user).await?;
        info!(id = user.id, role = %role, "User signed up");
        Ok(user)
    }

    /// Checks credentials against the store selected by `roles_id` and
    /// issues a token for that role.
    #[instrument(skip(users, tokens, dto), fields(roles_id = dto.roles_id))]
    pub async fn sign_in(
        users: &UserDirectory,
        tokens: &TokenService,
        dto: SignInDto,
    ) -> Result<AuthenticatedUserResponse, AppError> {
        let role = Role::from_roles_id(dto.roles_id).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Invalid rolesId: {}", dto.roles_id))
        })?;

        let credentials = users
            .for_role(role)
            .find_credentials(&normalize_email(&dto.email))
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&dto.password, &credentials.password_hash)? {
            return Err(invalid_credentials());
        }

        if !credentials.user.is_active() {
            return Err(invalid_credentials());
        }

        let token = tokens.issue(credentials.user.id, role)?;
        let user = credentials.user;

        Ok(AuthenticatedUserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
            token,
        })
    }
}
