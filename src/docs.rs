use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::authentication::controller::ErrorResponse;
use crate::modules::authentication::model::{
    AuthenticatedUserResponse, SignInDto, SignUpUserDto,
};
use crate::modules::users::model::{CountResponse, MessageResponse, UpdateUserDto, User, UserState};
use sweetmanager_auth::Role;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::authentication::controller::sign_up_admin,
        crate::modules::authentication::controller::sign_up_worker,
        crate::modules::authentication::controller::sign_up_owner,
        crate::modules::authentication::controller::sign_in,
        crate::modules::users::controller::get_owner_by_id,
        crate::modules::users::controller::get_all_admins,
        crate::modules::users::controller::get_all_workers,
        crate::modules::users::controller::get_admin_count,
        crate::modules::users::controller::get_worker_count,
        crate::modules::users::controller::update_admin,
        crate::modules::users::controller::update_worker,
        crate::modules::users::controller::update_owner,
    ),
    components(
        schemas(
            User,
            UserState,
            Role,
            SignUpUserDto,
            SignInDto,
            AuthenticatedUserResponse,
            UpdateUserDto,
            CountResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-up and sign-in for admins, workers and owners"),
        (name = "Users", description = "Role-scoped user lookups and profile updates")
    ),
    info(
        title = "SweetManager API",
        version = "0.1.0",
        description = "Identity and access endpoints of the SweetManager hotel platform.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/v1/authentication/sign-in",
            "/api/v1/authentication/sign-up-owner",
            "/api/v1/user/get-owner-id",
            "/api/v1/user/get-admin-count",
            "/api/v1/user/get-worker-count",
            "/api/v1/user/update-worker",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }

    #[test]
    fn test_every_operation_has_a_summary() {
        let doc = ApiDoc::openapi();

        for (path, item) in &doc.paths.paths {
            for operation in [&item.get, &item.put, &item.post].into_iter().flatten() {
                assert!(operation.summary.is_some(), "{path} has no summary");
            }
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();

        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
