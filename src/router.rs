use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::anonymous::AnonymousRoutes;
use crate::middleware::auth::{RequestAuthorization, authorize_request};
use crate::modules::authentication::router::{ANONYMOUS_ROUTES, init_authentication_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub const AUTHENTICATION_PREFIX: &str = "/api/v1/authentication";
pub const USER_PREFIX: &str = "/api/v1/user";

/// Every route template callable without a token.
pub fn anonymous_routes() -> AnonymousRoutes {
    AnonymousRoutes::nested(AUTHENTICATION_PREFIX, &ANONYMOUS_ROUTES)
}

/// Builds the application.
///
/// The authorization middleware wraps every API route; the docs UIs are
/// merged outside it.
pub fn init_router(state: AppState) -> Router {
    let anonymous = anonymous_routes();
    let authorization = RequestAuthorization::new(state.authenticator(), anonymous.clone());

    let api = Router::new()
        .nest(
            AUTHENTICATION_PREFIX,
            init_authentication_router(anonymous.clone()),
        )
        .nest(USER_PREFIX, init_users_router(anonymous))
        .layer(middleware::from_fn_with_state(
            authorization,
            authorize_request,
        ))
        .with_state(state.clone());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(api)
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
