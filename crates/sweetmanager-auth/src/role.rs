use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The three kinds of principal, each backed by its own user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_WORKER")]
    Worker,
    #[serde(rename = "ROLE_OWNER")]
    Owner,
}

/// A role literal that is none of `ROLE_ADMIN`, `ROLE_WORKER`, `ROLE_OWNER`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Worker, Role::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::Worker => "ROLE_WORKER",
            Role::Owner => "ROLE_OWNER",
        }
    }

    /// Maps the numeric role selector sent at sign-in.
    pub fn from_roles_id(roles_id: i32) -> Option<Role> {
        match roles_id {
            1 => Some(Role::Owner),
            2 => Some(Role::Admin),
            3 => Some(Role::Worker),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_literals() {
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("ROLE_WORKER".parse::<Role>(), Ok(Role::Worker));
        assert_eq!("ROLE_OWNER".parse::<Role>(), Ok(Role::Owner));
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(
            "role_admin".parse::<Role>(),
            Err(UnknownRole("role_admin".to_string()))
        );
        assert!("ROLE_MANAGER".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_from_roles_id() {
        assert_eq!(Role::from_roles_id(1), Some(Role::Owner));
        assert_eq!(Role::from_roles_id(2), Some(Role::Admin));
        assert_eq!(Role::from_roles_id(3), Some(Role::Worker));
        assert_eq!(Role::from_roles_id(0), None);
        assert_eq!(Role::from_roles_id(4), None);
    }

    #[test]
    fn test_serde_uses_wire_literals() {
        let json = serde_json::to_string(&Role::Worker).unwrap();
        assert_eq!(json, r#""ROLE_WORKER""#);

        let role: Role = serde_json::from_str(r#""ROLE_OWNER""#).unwrap();
        assert_eq!(role, Role::Owner);
    }
}
