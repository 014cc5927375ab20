//! Per-endpoint role filter.
//!
//! Runs after [`authorize_request`](crate::middleware::auth::authorize_request)
//! has attached an [`AuthContext`]. Installed with
//! `from_fn_with_state(EndpointPolicy, require_roles)` as a `route_layer`:
//!
//! ```rust,ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::role::{AllowedRoles, EndpointPolicy, require_roles};
//!
//! let routes = Router::new()
//!     .route("/get-admin-count", get(get_admin_count))
//!     .route_layer(middleware::from_fn_with_state(
//!         EndpointPolicy::new(AllowedRoles::only([Role::Owner]), anonymous),
//!         require_roles,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sweetmanager_auth::Role;

use crate::middleware::anonymous::AnonymousRoutes;
use crate::middleware::auth::{AuthContext, AuthError};

/// Roles an endpoint accepts. Empty means any authenticated role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedRoles(Vec<Role>);

impl AllowedRoles {
    pub fn any() -> Self {
        Self(Vec::new())
    }

    pub fn only<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        Self(roles.into_iter().collect())
    }

    pub fn permits(&self, role: Role) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }
}

/// Decides whether a request may reach an endpoint.
///
/// Anonymous endpoints always pass. Otherwise a missing context is 401 and
/// a role outside `allowed` is 403.
pub fn check_access(
    anonymous: bool,
    context: Option<&AuthContext>,
    allowed: &AllowedRoles,
) -> Result<(), AuthError> {
    if anonymous {
        return Ok(());
    }

    let context = context.ok_or(AuthError::MissingCredentials)?;
    if allowed.permits(context.role()) {
        Ok(())
    } else {
        Err(AuthError::RoleNotPermitted(context.role()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EndpointPolicy {
    allowed: AllowedRoles,
    anonymous: AnonymousRoutes,
}

impl EndpointPolicy {
    pub fn new(allowed: AllowedRoles, anonymous: AnonymousRoutes) -> Self {
        Self { allowed, anonymous }
    }
}

pub async fn require_roles(
    State(policy): State<EndpointPolicy>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    check_access(
        policy.anonymous.is_anonymous(&req),
        req.extensions().get::<AuthContext>(),
        &policy.allowed,
    )?;

    Ok(next.run(req).await)
}
