//! OpenAPI documentation configuration.
//!
//! The rendered documentation is served by Scalar at `/docs`.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::api;

/// Bearer token security scheme for authenticated endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearer_auth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token authentication. Obtain a token from `POST /login` or \
                             `POST /signup` and send it in the `Authorization` header:\n\n\
                             ```\nAuthorization: Bearer YOUR_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill API",
        description = "A self-hostable blogging backend with JWT authentication and owner-scoped post listings."
    ),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::auth::signup,
        api::handlers::auth::login,
        api::handlers::posts::list_posts,
        api::handlers::posts::create_post,
        api::handlers::posts::get_post,
        api::handlers::posts::update_post,
        api::handlers::posts::delete_post,
    ),
    components(schemas(
        api::models::auth::SignupRequest,
        api::models::auth::SignupResponse,
        api::models::auth::LoginRequest,
        api::models::auth::LoginResponse,
        api::models::users::UserResponse,
        api::models::posts::PostCreate,
        api::models::posts::PostUpdate,
        api::models::posts::PostResponse,
        api::models::posts::PostEnvelope,
        api::models::posts::PostListResponse,
    )),
    tags(
        (name = "authentication", description = "Account creation and session issuance"),
        (name = "posts", description = "Post authoring and reading"),
    )
)]
pub struct ApiDoc;
