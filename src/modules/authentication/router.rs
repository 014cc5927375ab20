use crate::middleware::anonymous::AnonymousRoutes;
use crate::middleware::role::{AllowedRoles, EndpointPolicy, require_roles};
use crate::state::AppState;
use axum::{Router, middleware, routing::post};

use super::controller::{sign_in, sign_up_admin, sign_up_owner, sign_up_worker};

/// Routes of this module reachable without a token, relative to where the
/// router is nested.
pub const ANONYMOUS_ROUTES: [&str; 4] = [
    "/sign-up-admin",
    "/sign-up-worker",
    "/sign-up-owner",
    "/sign-in",
];

pub fn init_authentication_router(anonymous: AnonymousRoutes) -> Router<AppState> {
    Router::new()
        .route("/sign-up-admin", post(sign_up_admin))
        .route("/sign-up-worker", post(sign_up_worker))
        .route("/sign-up-owner", post(sign_up_owner))
        .route("/sign-in", post(sign_in))
        .route_layer(middleware::from_fn_with_state(
            EndpointPolicy::new(AllowedRoles::any(), anonymous),
            require_roles,
        ))
}
