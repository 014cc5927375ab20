use crate::middleware::anonymous::AnonymousRoutes;
use crate::middleware::role::{AllowedRoles, EndpointPolicy, require_roles};
use crate::modules::users::controller::{
    get_admin_count, get_all_admins, get_all_workers, get_owner_by_id, get_worker_count,
    update_admin, update_owner, update_worker,
};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, put},
};

pub fn init_users_router(anonymous: AnonymousRoutes) -> Router<AppState> {
    let filtered = Router::new()
        .route("/get-admin-count", get(get_admin_count))
        .route("/get-worker-count", get(get_worker_count))
        .route("/update-admin", put(update_admin))
        .route("/update-worker", put(update_worker))
        .route("/update-owner", put(update_owner))
        .route_layer(middleware::from_fn_with_state(
            EndpointPolicy::new(AllowedRoles::any(), anonymous),
            require_roles,
        ));

    Router::new()
        .route("/get-owner-id", get(get_owner_by_id))
        .route("/get-all-admins", get(get_all_admins))
        .route("/get-all-workers", get(get_all_workers))
        .merge(filtered)
}
