use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;
use sweetmanager_auth::Role;
use sweetmanager_core::AppError;

use super::postgres::PgUserRepository;
use super::repository::UserRepository;

/// Maps each [`Role`] to the store that holds its users.
///
/// This is the single place where a role picks a store; callers never
/// branch on the role themselves.
#[derive(Clone)]
pub struct UserDirectory {
    admins: Arc<dyn UserRepository>,
    workers: Arc<dyn UserRepository>,
    owners: Arc<dyn UserRepository>,
}

impl UserDirectory {
    /// # Errors
    ///
    /// Returns an internal error if a repository is bound to a different
    /// role than its slot.
    pub fn new(
        admins: Arc<dyn UserRepository>,
        workers: Arc<dyn UserRepository>,
        owners: Arc<dyn UserRepository>,
    ) -> Result<Self, AppError> {
        for (slot, store) in [
            (Role::Admin, &admins),
            (Role::Worker, &workers),
            (Role::Owner, &owners),
        ] {
            if store.role() != slot {
                return Err(AppError::internal(anyhow::anyhow!(
                    "{} slot holds the {} store",
                    slot,
                    store.role()
                )));
            }
        }

        Ok(Self {
            admins,
            workers,
            owners,
        })
    }

    /// Builds every slot from the store created for its own role.
    fn from_role(store_for: impl Fn(Role) -> Arc<dyn UserRepository>) -> Self {
        Self {
            admins: store_for(Role::Admin),
            workers: store_for(Role::Worker),
            owners: store_for(Role::Owner),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::from_role(|role| Arc::new(PgUserRepository::new(pool.clone(), role)))
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory() -> Self {
        use super::memory::InMemoryUserRepository;

        Self::from_role(|role| Arc::new(InMemoryUserRepository::new(role)))
    }

    pub fn for_role(&self, role: Role) -> &dyn UserRepository {
        match role {
            Role::Admin => self.admins.as_ref(),
            Role::Worker => self.workers.as_ref(),
            Role::Owner => self.owners.as_ref(),
        }
    }
}

impl fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDirectory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_role_gets_its_own_store() {
        let directory = UserDirectory::in_memory();

        for role in Role::ALL {
            assert_eq!(directory.for_role(role).role(), role);
        }
    }

    #[test]
    fn test_mismatched_slot_is_rejected() {
        use super::super::memory::InMemoryUserRepository;

        let err = UserDirectory::new(
            Arc::new(InMemoryUserRepository::new(Role::Admin)),
            Arc::new(InMemoryUserRepository::new(Role::Owner)),
            Arc::new(InMemoryUserRepository::new(Role::Owner)),
        )
        .unwrap_err();

        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.error.to_string(),
            "ROLE_WORKER slot holds the ROLE_OWNER store"
        );
    }

    #[test]
    fn test_matching_slots_are_accepted() {
        use super::super::memory::InMemoryUserRepository;

        let directory = UserDirectory::new(
            Arc::new(InMemoryUserRepository::new(Role::Admin)),
            Arc::new(InMemoryUserRepository::new(Role::Worker)),
            Arc::new(InMemoryUserRepository::new(Role::Owner)),
        )
        .unwrap();

        for role in Role::ALL {
            assert_eq!(directory.for_role(role).role(), role);
        }
    }
}
